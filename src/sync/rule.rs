use crate::error::Result;
use crate::provider::RuleApi;
use crate::types::{FirewallRule, NewFirewallRule};

pub const DEFAULT_RULE_DESCRIPTION: &str = "Allow Uptime Robot IPs";

#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// At least one allow rule with the description already existed.
    Exists { matches: usize },
    Created(FirewallRule),
}

/// Keeps one allow rule, keyed by description, in place.
pub struct RuleEnsurer<'a, R: RuleApi + ?Sized> {
    api: &'a R,
}

impl<'a, R: RuleApi + ?Sized> RuleEnsurer<'a, R> {
    pub fn new(api: &'a R) -> Self {
        Self { api }
    }

    /// Creates the rule unless an allow rule with `description` exists.
    /// Duplicates are left alone.
    pub async fn ensure(&self, description: &str, expression: &str) -> Result<RuleOutcome> {
        let existing = self.api.firewall_rules(description).await?;
        if !existing.is_empty() {
            log::info!("firewall rule '{}' already exists", description);
            return Ok(RuleOutcome::Exists {
                matches: existing.len(),
            });
        }

        log::info!("creating firewall rule '{}'", description);
        let rule = self
            .api
            .create_firewall_rule(&NewFirewallRule::allow(description, expression))
            .await?;
        log::info!("firewall rule created: {}", rule.id);

        Ok(RuleOutcome::Created(rule))
    }
}
