use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const LIST_KIND_IP: &str = "ip";
pub const ACTION_ALLOW: &str = "allow";

////////////////////////////////////////////////////////////
// Credentials & identity
////////////////////////////////////////////////////////////
#[derive(Clone)]
pub struct Credentials {
    api_token: String,
    account: String,
    domain: String,
}

impl Credentials {
    pub fn new(
        api_token: impl Into<String>,
        account: impl Into<String>,
        domain: impl Into<String>,
    ) -> Result<Self> {
        let api_token = api_token.into();
        let account = account.into();
        let domain = domain.into();

        for (field, value) in [
            ("api token", &api_token),
            ("account", &account),
            ("domain", &domain),
        ] {
            if value.is_empty() {
                return Err(Error::ConfigurationInvalid(format!("{} is required", field)));
            }
        }

        Ok(Self {
            api_token,
            account,
            domain,
        })
    }

    pub fn api_token(&self) -> &str {
        &self.api_token
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }
}

// Keep the token out of debug output.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &"***")
            .field("account", &self.account)
            .field("domain", &self.domain)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountIdentity {
    pub account_id: String,
    pub zone_id: String,
}

/// `id`/`name` pair returned by the account and zone lookups.
#[derive(Debug, Clone, Deserialize)]
pub struct NamedResource {
    pub id: String,

    #[serde(default)]
    pub name: String,
}

/// One entry of an envelope's `errors` array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub code: i64,

    #[serde(default)]
    pub message: String,
}

////////////////////////////////////////////////////////////
// Lists
////////////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IpList {
    pub id: String,
    pub name: String,
    pub kind: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub num_items: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewIpList {
    pub name: String,
    pub kind: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListItem {
    pub id: String,
    pub ip: String,

    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewListItem {
    pub ip: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl NewListItem {
    pub fn ip(ip: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            comment: None,
        }
    }
}

/// Reference to a server-assigned item id, used by item deletion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemRef {
    pub id: String,
}

////////////////////////////////////////////////////////////
// Bulk operations
////////////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Unknown(String),
}

impl OperationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OperationStatus::Pending => "pending",
            OperationStatus::Running => "running",
            OperationStatus::Completed => "completed",
            OperationStatus::Failed => "failed",
            OperationStatus::Unknown(s) => s.as_str(),
        }
    }
}

impl std::fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle returned by item create/replace; the mutation itself runs server side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OperationRef {
    pub operation_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BulkOperation {
    pub id: String,
    pub status: OperationStatus,

    #[serde(default)]
    pub error: Option<String>,

    #[serde(default)]
    pub completed: Option<String>,
}

////////////////////////////////////////////////////////////
// Firewall rules
////////////////////////////////////////////////////////////
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FirewallRule {
    pub id: String,

    #[serde(default)]
    pub description: Option<String>,

    pub action: String,

    #[serde(default)]
    pub paused: bool,

    #[serde(default)]
    pub filter: Option<RuleFilter>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RuleFilter {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub expression: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewFirewallRule {
    pub description: String,
    pub action: String,
    pub paused: bool,
    pub filter: NewRuleFilter,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRuleFilter {
    pub expression: String,
    pub paused: bool,
}

impl NewFirewallRule {
    /// An enabled allow rule with the given filter expression.
    pub fn allow(description: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            action: ACTION_ALLOW.to_string(),
            paused: false,
            filter: NewRuleFilter {
                expression: expression.into(),
                paused: false,
            },
        }
    }
}

/// Filter expression matching source addresses contained in the named list.
pub fn list_filter_expression(list_name: &str) -> String {
    format!("(ip.src in ${})", list_name)
}
