use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    BulkOperation, FirewallRule, IpList, ItemRef, ListItem, NewFirewallRule, NewIpList,
    NewListItem, OperationRef,
};

#[async_trait]
pub trait ListApi: Send + Sync {
    async fn lists(&self) -> Result<Vec<IpList>>;

    async fn list(&self, list_id: &str) -> Result<IpList>;

    async fn create_list(&self, list: &NewIpList) -> Result<IpList>;

    async fn delete_list(&self, list_id: &str) -> Result<()>;

    async fn list_items(&self, list_id: &str) -> Result<Vec<ListItem>>;

    async fn create_items(&self, list_id: &str, items: &[NewListItem]) -> Result<OperationRef>;

    // Full replace: items not in `items` are removed.
    async fn replace_items(&self, list_id: &str, items: &[NewListItem]) -> Result<OperationRef>;

    async fn delete_items(&self, list_id: &str, items: &[ItemRef]) -> Result<OperationRef>;

    async fn bulk_operation(&self, operation_id: &str) -> Result<BulkOperation>;
}

#[async_trait]
pub trait RuleApi: Send + Sync {
    // Allow rules whose description is exactly `description`, possibly several.
    async fn firewall_rules(&self, description: &str) -> Result<Vec<FirewallRule>>;

    async fn create_firewall_rule(&self, rule: &NewFirewallRule) -> Result<FirewallRule>;
}
