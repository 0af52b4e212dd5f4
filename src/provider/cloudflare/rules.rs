// Rules: Security > WAF > Firewall rules
use async_trait::async_trait;

use crate::error::{ApiOperation, Error, Result};
use crate::provider::RuleApi;
use crate::types::{ACTION_ALLOW, FirewallRule, NewFirewallRule};

use super::cloudflare::Cloudflare;

impl Cloudflare {
    fn rules_path(&self) -> Result<String> {
        Ok(format!("/zones/{}/firewall/rules", self.zone_id()?))
    }
}

#[async_trait]
impl RuleApi for Cloudflare {
    async fn firewall_rules(&self, description: &str) -> Result<Vec<FirewallRule>> {
        let query = [("action", ACTION_ALLOW), ("description", description)];
        let resp = self.cli.get(&self.rules_path()?, &query).await?;
        if !resp.success {
            return Err(resp.failure(ApiOperation::FirewallRulesFetch));
        }

        // The server matches `description` as a case-insensitive substring.
        let rules: Vec<FirewallRule> = resp.into_result_or_default()?;
        Ok(rules
            .into_iter()
            .filter(|r| r.description.as_deref() == Some(description))
            .collect())
    }

    async fn create_firewall_rule(&self, rule: &NewFirewallRule) -> Result<FirewallRule> {
        // The endpoint takes and returns arrays of rules.
        let resp = self
            .cli
            .post(&self.rules_path()?, std::slice::from_ref(rule))
            .await?;
        if !resp.success {
            return Err(resp.failure(ApiOperation::FirewallRuleCreate));
        }

        let created: Vec<FirewallRule> = resp.into_result()?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| Error::Parse("firewall rule create returned no rule".to_string()))
    }
}
