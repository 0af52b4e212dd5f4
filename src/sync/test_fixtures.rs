//! In-memory fakes of the provider traits, recording every call.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::fetcher::Fetcher;
use crate::provider::{ListApi, RuleApi};
use crate::types::{
    BulkOperation, FirewallRule, IpList, ItemRef, ListItem, NewFirewallRule, NewIpList,
    NewListItem, OperationRef, OperationStatus, RuleFilter,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Lists,
    List(String),
    CreateList(NewIpList),
    DeleteList(String),
    ListItems(String),
    CreateItems(String, Vec<String>),
    ReplaceItems(String, Vec<String>),
    DeleteItems(String, Vec<String>),
    BulkOperation(String),
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::CreateList(_)
                | Call::DeleteList(_)
                | Call::CreateItems(..)
                | Call::ReplaceItems(..)
                | Call::DeleteItems(..)
        )
    }
}

#[derive(Default)]
struct ListState {
    lists: Vec<IpList>,
    items: Vec<ListItem>,
    statuses: VecDeque<String>,
    calls: Vec<Call>,
    next_op: usize,
}

#[derive(Default)]
pub struct FakeListApi {
    state: Mutex<ListState>,
}

pub fn ip_list(id: &str, name: &str, num_items: u64) -> IpList {
    IpList {
        id: id.to_string(),
        name: name.to_string(),
        kind: "ip".to_string(),
        description: None,
        num_items,
    }
}

impl FakeListApi {
    pub fn with_list(self, list: IpList) -> Self {
        self.state.lock().unwrap().lists.push(list);
        self
    }

    /// Items stored in every list; also sets `num_items` of known lists.
    pub fn with_items(self, ips: &[&str]) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.items = ips
                .iter()
                .enumerate()
                .map(|(i, ip)| ListItem {
                    id: format!("item-{}", i),
                    ip: ip.to_string(),
                    comment: None,
                })
                .collect();
            for list in state.lists.iter_mut() {
                list.num_items = ips.len() as u64;
            }
        }
        self
    }

    /// Statuses returned by successive bulk operation polls; `completed` once exhausted.
    pub fn with_statuses(self, statuses: &[&str]) -> Self {
        self.state.lock().unwrap().statuses = statuses.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    pub fn status_polls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::BulkOperation(_)))
            .count()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn next_operation(&self) -> OperationRef {
        let mut state = self.state.lock().unwrap();
        state.next_op += 1;
        OperationRef {
            operation_id: format!("op-{}", state.next_op),
        }
    }
}

fn ips_of(items: &[NewListItem]) -> Vec<String> {
    items.iter().map(|i| i.ip.clone()).collect()
}

#[async_trait]
impl ListApi for FakeListApi {
    async fn lists(&self) -> Result<Vec<IpList>> {
        self.record(Call::Lists);
        Ok(self.state.lock().unwrap().lists.clone())
    }

    async fn list(&self, list_id: &str) -> Result<IpList> {
        self.record(Call::List(list_id.to_string()));
        self.state
            .lock()
            .unwrap()
            .lists
            .iter()
            .find(|l| l.id == list_id)
            .cloned()
            .ok_or_else(|| Error::Parse(format!("no list {}", list_id)))
    }

    async fn create_list(&self, list: &NewIpList) -> Result<IpList> {
        self.record(Call::CreateList(list.clone()));
        let created = IpList {
            id: "list-created".to_string(),
            name: list.name.clone(),
            kind: list.kind.clone(),
            description: Some(list.description.clone()),
            num_items: 0,
        };
        self.state.lock().unwrap().lists.push(created.clone());
        Ok(created)
    }

    async fn delete_list(&self, list_id: &str) -> Result<()> {
        self.record(Call::DeleteList(list_id.to_string()));
        Ok(())
    }

    async fn list_items(&self, list_id: &str) -> Result<Vec<ListItem>> {
        self.record(Call::ListItems(list_id.to_string()));
        Ok(self.state.lock().unwrap().items.clone())
    }

    async fn create_items(&self, list_id: &str, items: &[NewListItem]) -> Result<OperationRef> {
        self.record(Call::CreateItems(list_id.to_string(), ips_of(items)));
        Ok(self.next_operation())
    }

    async fn replace_items(&self, list_id: &str, items: &[NewListItem]) -> Result<OperationRef> {
        self.record(Call::ReplaceItems(list_id.to_string(), ips_of(items)));
        Ok(self.next_operation())
    }

    async fn delete_items(&self, list_id: &str, items: &[ItemRef]) -> Result<OperationRef> {
        self.record(Call::DeleteItems(
            list_id.to_string(),
            items.iter().map(|i| i.id.clone()).collect(),
        ));
        Ok(self.next_operation())
    }

    async fn bulk_operation(&self, operation_id: &str) -> Result<BulkOperation> {
        self.record(Call::BulkOperation(operation_id.to_string()));
        let raw = self
            .state
            .lock()
            .unwrap()
            .statuses
            .pop_front()
            .unwrap_or_else(|| "completed".to_string());
        let status: OperationStatus = serde_json::from_value(serde_json::Value::String(raw))?;
        let error = (status == OperationStatus::Failed).then(|| "operation failed".to_string());
        let completed = matches!(status, OperationStatus::Completed | OperationStatus::Failed)
            .then(|| "2020-01-01T08:00:00Z".to_string());

        Ok(BulkOperation {
            id: operation_id.to_string(),
            status,
            error,
            completed,
        })
    }
}

#[derive(Default)]
struct RuleState {
    rules: Vec<FirewallRule>,
    created: Vec<NewFirewallRule>,
    queries: Vec<String>,
}

#[derive(Default)]
pub struct FakeRuleApi {
    state: Mutex<RuleState>,
}

impl FakeRuleApi {
    pub fn with_rule(self, description: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let id = format!("rule-{}", state.rules.len());
            state.rules.push(FirewallRule {
                id,
                description: Some(description.to_string()),
                action: "allow".to_string(),
                paused: false,
                filter: None,
            });
        }
        self
    }

    pub fn created(&self) -> Vec<NewFirewallRule> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn queries(&self) -> Vec<String> {
        self.state.lock().unwrap().queries.clone()
    }
}

#[async_trait]
impl RuleApi for FakeRuleApi {
    async fn firewall_rules(&self, description: &str) -> Result<Vec<FirewallRule>> {
        let mut state = self.state.lock().unwrap();
        state.queries.push(description.to_string());
        Ok(state
            .rules
            .iter()
            .filter(|r| r.description.as_deref() == Some(description))
            .cloned()
            .collect())
    }

    async fn create_firewall_rule(&self, rule: &NewFirewallRule) -> Result<FirewallRule> {
        let mut state = self.state.lock().unwrap();
        state.created.push(rule.clone());
        Ok(FirewallRule {
            id: "rule-created".to_string(),
            description: Some(rule.description.clone()),
            action: rule.action.clone(),
            paused: rule.paused,
            filter: Some(RuleFilter {
                id: None,
                expression: Some(rule.filter.expression.clone()),
            }),
        })
    }
}

pub struct FakeFetcher(pub Vec<String>);

impl FakeFetcher {
    pub fn new(ips: &[&str]) -> Self {
        Self(ips.iter().map(|s| s.to_string()).collect())
    }
}

#[async_trait]
impl Fetcher for FakeFetcher {
    async fn fetch(&self) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}
