use crate::error::{ApiOperation, Error, IdentityKind, Result};
use crate::types::{AccountIdentity, Credentials, NamedResource};

use super::restful_cli::CfClient;

pub struct Cloudflare {
    pub(super) cli: CfClient,
    credentials: Credentials,
    identity: Option<AccountIdentity>,
}

impl Cloudflare {
    pub fn new(credentials: Credentials) -> Self {
        let cli = CfClient::new(credentials.api_token());
        Self::with_client(credentials, cli)
    }

    pub fn with_client(credentials: Credentials, cli: CfClient) -> Self {
        Self {
            cli,
            credentials,
            identity: None,
        }
    }

    pub async fn initialize(&mut self) -> Result<&AccountIdentity> {
        self.verify_token().await?;
        log::info!("api token is valid");

        let account_id = self.resolve_account_id(self.credentials.account()).await?;
        log::info!(
            "account id for account '{}' is {}",
            self.credentials.account(),
            account_id
        );

        let zone_id = self.resolve_zone_id(self.credentials.domain()).await?;
        log::info!(
            "zone id for domain '{}' is {}",
            self.credentials.domain(),
            zone_id
        );

        Ok(self.identity.insert(AccountIdentity {
            account_id,
            zone_id,
        }))
    }

    pub fn identity(&self) -> Result<&AccountIdentity> {
        self.identity.as_ref().ok_or(Error::NotInitialized)
    }

    pub(super) fn account_id(&self) -> Result<&str> {
        Ok(self.identity()?.account_id.as_str())
    }

    pub(super) fn zone_id(&self) -> Result<&str> {
        Ok(self.identity()?.zone_id.as_str())
    }

    pub async fn verify_token(&self) -> Result<()> {
        let resp = self.cli.get("/user/tokens/verify", &[]).await?;
        if !resp.success {
            return Err(resp.failure(ApiOperation::TokenVerify));
        }
        Ok(())
    }

    pub async fn resolve_account_id(&self, name: &str) -> Result<String> {
        let resp = self.cli.get("/accounts", &[("name", name)]).await?;
        if !resp.success {
            return Err(resp.failure(ApiOperation::AccountLookup));
        }

        let accounts: Vec<NamedResource> = resp.into_result_or_default()?;
        first_id(accounts, IdentityKind::Account, name)
    }

    pub async fn resolve_zone_id(&self, name: &str) -> Result<String> {
        let resp = self.cli.get("/zones", &[("name", name)]).await?;
        if !resp.success {
            return Err(resp.failure(ApiOperation::ZoneLookup));
        }

        let zones: Vec<NamedResource> = resp.into_result_or_default()?;
        first_id(zones, IdentityKind::Zone, name)
    }
}

fn first_id(found: Vec<NamedResource>, kind: IdentityKind, name: &str) -> Result<String> {
    if found.len() > 1 {
        log::debug!("{} {} matches for '{}', using the first", found.len(), kind, name);
    }

    found
        .into_iter()
        .next()
        .map(|r| r.id)
        .ok_or_else(|| Error::IdentityResolutionFailed {
            kind,
            name: name.to_string(),
        })
}
