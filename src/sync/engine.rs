use std::collections::HashSet;
use std::time::Duration;

use crate::error::Result;
use crate::fetcher::Fetcher;
use crate::provider::ListApi;
use crate::types::{IpList, LIST_KIND_IP, ListItem, NewIpList, NewListItem};

use super::bulk::BulkOperationTracker;

pub const DEFAULT_LIST_NAME: &str = "uptime_robot_ips";
pub const DEFAULT_LIST_DESCRIPTION: &str = "Uptime Robot IPs";

/// The list to keep in sync, identified by its unique name.
#[derive(Debug, Clone, PartialEq)]
pub struct ListTarget {
    pub name: String,
    pub kind: String,
    pub description: String,
}

impl Default for ListTarget {
    fn default() -> Self {
        Self {
            name: DEFAULT_LIST_NAME.to_string(),
            kind: LIST_KIND_IP.to_string(),
            description: DEFAULT_LIST_DESCRIPTION.to_string(),
        }
    }
}

impl From<&ListTarget> for NewIpList {
    fn from(target: &ListTarget) -> Self {
        NewIpList {
            name: target.name.clone(),
            kind: target.kind.clone(),
            description: target.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// The list was empty and every reference address was added.
    Created { count: usize },
    /// Addresses were missing; the list now holds exactly the reference set.
    Replaced { missing: Vec<String>, count: usize },
    /// Nothing to do.
    Unchanged,
}

/// Makes a remote list hold the reference address set.
pub struct ReconciliationEngine<'a, A: ListApi + ?Sized> {
    api: &'a A,
    poll_interval: Duration,
}

impl<'a, A: ListApi + ?Sized> ReconciliationEngine<'a, A> {
    pub fn new(api: &'a A, poll_interval: Duration) -> Self {
        Self { api, poll_interval }
    }

    /// Finds the target list, creating it when absent, then fetches the
    /// reference addresses from `source` and reconciles.
    pub async fn sync(&self, target: &ListTarget, source: &dyn Fetcher) -> Result<SyncOutcome> {
        let list = self.find_or_create(target).await?;

        let ips = source.fetch().await?;
        log::info!("found {} reference ips", ips.len());

        self.reconcile(&list, &ips).await
    }

    /// Same as [`ReconciliationEngine::sync`] with an already fetched reference set.
    pub async fn sync_ips(&self, target: &ListTarget, ips: &[String]) -> Result<SyncOutcome> {
        let list = self.find_or_create(target).await?;
        self.reconcile(&list, ips).await
    }

    pub async fn find_or_create(&self, target: &ListTarget) -> Result<IpList> {
        let lists = self.api.lists().await?;
        if let Some(list) = lists.into_iter().find(|l| l.name == target.name) {
            log::info!(
                "found list '{}' ({}) with {} items",
                list.name,
                list.id,
                list.num_items
            );
            return Ok(list);
        }

        log::info!("could not find list '{}', creating it", target.name);
        let list = self.api.create_list(&NewIpList::from(target)).await?;
        log::info!("list '{}' created ({})", list.name, list.id);
        Ok(list)
    }

    async fn reconcile(&self, list: &IpList, ips: &[String]) -> Result<SyncOutcome> {
        let tracker = BulkOperationTracker::new(self.api, self.poll_interval);
        let items: Vec<NewListItem> = ips.iter().map(NewListItem::ip).collect();

        // An empty list gets everything in one create, no paging needed.
        if list.num_items == 0 {
            if items.is_empty() {
                log::warn!("reference set is empty, leaving list '{}' empty", list.name);
                return Ok(SyncOutcome::Unchanged);
            }

            log::info!("list is new or empty, adding all {} ips", items.len());
            let op = self.api.create_items(&list.id, &items).await?;
            log::info!("created list items, operation id: {}", op.operation_id);
            tracker.await_completion(&op.operation_id).await?;
            log::info!("all ips added");
            return Ok(SyncOutcome::Created { count: items.len() });
        }

        let existing = self.api.list_items(&list.id).await?;
        let missing = missing_ips(ips, &existing);
        log::info!("found {} missing ips", missing.len());
        if missing.is_empty() {
            return Ok(SyncOutcome::Unchanged);
        }

        log::info!("replacing list items with all {} ips", items.len());
        let op = self.api.replace_items(&list.id, &items).await?;
        log::info!("replaced list items, operation id: {}", op.operation_id);
        tracker.await_completion(&op.operation_id).await?;
        log::info!("all ips added");

        Ok(SyncOutcome::Replaced {
            missing,
            count: items.len(),
        })
    }
}

/// Reference addresses with no item of the exact same text, in reference order.
pub fn missing_ips(reference: &[String], existing: &[ListItem]) -> Vec<String> {
    let present: HashSet<&str> = existing.iter().map(|item| item.ip.as_str()).collect();
    reference
        .iter()
        .filter(|ip| !present.contains(ip.as_str()))
        .cloned()
        .collect()
}
