mod bulk;
pub use bulk::{BulkOperationTracker, DEFAULT_POLL_INTERVAL};

mod engine;
pub use engine::{
    DEFAULT_LIST_DESCRIPTION, DEFAULT_LIST_NAME, ListTarget, ReconciliationEngine, SyncOutcome,
    missing_ips,
};

mod rule;
pub use rule::{DEFAULT_RULE_DESCRIPTION, RuleEnsurer, RuleOutcome};

#[cfg(test)]
mod test_fixtures;
