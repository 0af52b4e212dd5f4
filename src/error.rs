use std::fmt;

use thiserror::Error;

use crate::types::{ApiMessage, BulkOperation};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("{operation} failed: {errors}")]
    ApiCallFailed {
        operation: ApiOperation,
        errors: ApiErrors,
    },

    #[error("could not find {kind} id for '{name}'")]
    IdentityResolutionFailed { kind: IdentityKind, name: String },

    #[error("bulk operation {} failed: {reason}", .operation.id)]
    BulkOperationFailed {
        reason: String,
        operation: Box<BulkOperation>,
    },

    #[error("unknown status '{status}' for bulk operation {id}")]
    UnknownOperationStatus { id: String, status: String },

    #[error("invalid configuration: {0}")]
    ConfigurationInvalid(String),

    #[error("account and zone ids are not resolved, call initialize() first")]
    NotInitialized,

    #[error("parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOperation {
    TokenVerify,
    AccountLookup,
    ZoneLookup,
    ListsFetch,
    ListFetch,
    ListCreate,
    ListDelete,
    ListItemsFetch,
    ListItemsCreate,
    ListItemsReplace,
    ListItemsDelete,
    BulkOperationFetch,
    FirewallRulesFetch,
    FirewallRuleCreate,
}

impl ApiOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiOperation::TokenVerify => "token verify",
            ApiOperation::AccountLookup => "account lookup",
            ApiOperation::ZoneLookup => "zone lookup",
            ApiOperation::ListsFetch => "lists fetch",
            ApiOperation::ListFetch => "list fetch",
            ApiOperation::ListCreate => "list create",
            ApiOperation::ListDelete => "list delete",
            ApiOperation::ListItemsFetch => "list items fetch",
            ApiOperation::ListItemsCreate => "list items create",
            ApiOperation::ListItemsReplace => "list items replace",
            ApiOperation::ListItemsDelete => "list items delete",
            ApiOperation::BulkOperationFetch => "bulk operation fetch",
            ApiOperation::FirewallRulesFetch => "firewall rules fetch",
            ApiOperation::FirewallRuleCreate => "firewall rule create",
        }
    }
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityKind {
    Account,
    Zone,
}

impl fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IdentityKind::Account => f.write_str("account"),
            IdentityKind::Zone => f.write_str("zone"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiErrors(pub Vec<ApiMessage>);

impl fmt::Display for ApiErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("no error detail returned");
        }

        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "[{}] {}", e.code, e.message)?;
        }
        Ok(())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Error {
        Error::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::Parse(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Error {
        Error::Parse(err.to_string())
    }
}
