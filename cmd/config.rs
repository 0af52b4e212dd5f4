use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use allowlist_syncer::error::Result;
use allowlist_syncer::fetcher::UPTIME_ROBOT_IPS_URL;
use allowlist_syncer::provider::CF_API_BASE;
use allowlist_syncer::sync::{DEFAULT_POLL_INTERVAL, DEFAULT_RULE_DESCRIPTION, ListTarget};
use allowlist_syncer::types::Credentials;

////////////////////////////////////////////////////////////
// Command line
////////////////////////////////////////////////////////////
#[derive(Debug, Clone, clap::Parser)]
#[command(about = "Keep a Cloudflare IP list and allow rule in sync with Uptime Robot's probe addresses")]
pub struct Args {
    /// Optional YAML config file; flags and environment override it
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, env = "CLOUDFLARE_API_KEY", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Account display name
    #[arg(long, env = "CLOUDFLARE_ACCOUNT")]
    pub account: Option<String>,

    /// Zone (domain) display name
    #[arg(long, env = "CLOUDFLARE_DOMAIN")]
    pub domain: Option<String>,

    /// Plain-text address list to mirror
    #[arg(long, env = "UPTIME_ROBOT_IPS_URL")]
    pub ips_url: Option<String>,

    /// Keep IPv6 addresses from the source
    #[arg(long)]
    pub ipv6: bool,

    #[arg(long)]
    pub poll_interval_ms: Option<u64>,

    #[arg(short, long)]
    pub verbose: bool,
}

////////////////////////////////////////////////////////////
// Yaml file
////////////////////////////////////////////////////////////
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CfgCloudflare {
    pub api_token: Option<String>,
    pub account: Option<String>,
    pub domain: Option<String>,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CfgSource {
    pub url: Option<String>,
    pub ipv6: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CfgList {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CfgRule {
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Cfg {
    pub cloudflare: CfgCloudflare,
    pub source: CfgSource,
    pub list: CfgList,
    pub rule: CfgRule,
    pub poll_interval_ms: Option<u64>,
}

pub struct Parser;

impl Parser {
    pub fn parse_yaml<P: AsRef<Path>>(path: P) -> Result<Cfg> {
        let reader = Self::file_reader(path)?;
        let config: Cfg = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    fn file_reader<P: AsRef<Path>>(path: P) -> Result<BufReader<File>> {
        let f = std::fs::File::open(path)?;
        Ok(BufReader::new(f))
    }
}

////////////////////////////////////////////////////////////
// Resolved settings
////////////////////////////////////////////////////////////
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub api_base: String,
    pub ips_url: String,
    pub ipv6: bool,
    pub list: ListTarget,
    pub rule_description: String,
    pub poll_interval: Duration,
}

impl Settings {
    pub fn load(args: &Args) -> Result<Self> {
        let cfg = match &args.config {
            Some(path) => Parser::parse_yaml(path)?,
            None => Cfg::default(),
        };
        Self::from_parts(args, cfg)
    }

    /// Flags and environment win over the file, the file wins over defaults.
    pub fn from_parts(args: &Args, cfg: Cfg) -> Result<Self> {
        let Cfg {
            cloudflare,
            source,
            list,
            rule,
            poll_interval_ms,
        } = cfg;

        let credentials = Credentials::new(
            args.api_token.clone().or(cloudflare.api_token).unwrap_or_default(),
            args.account.clone().or(cloudflare.account).unwrap_or_default(),
            args.domain.clone().or(cloudflare.domain).unwrap_or_default(),
        )?;

        let mut target = ListTarget::default();
        if let Some(name) = list.name {
            target.name = name;
        }
        if let Some(description) = list.description {
            target.description = description;
        }

        let poll_interval = args
            .poll_interval_ms
            .or(poll_interval_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        Ok(Self {
            credentials,
            api_base: cloudflare.api_base.unwrap_or_else(|| CF_API_BASE.to_string()),
            ips_url: args
                .ips_url
                .clone()
                .or(source.url)
                .unwrap_or_else(|| UPTIME_ROBOT_IPS_URL.to_string()),
            ipv6: args.ipv6 || source.ipv6.unwrap_or(false),
            list: target,
            rule_description: rule
                .description
                .unwrap_or_else(|| DEFAULT_RULE_DESCRIPTION.to_string()),
            poll_interval,
        })
    }
}

////////////////////////////////////////////////////////////
// Unit test
////////////////////////////////////////////////////////////
#[cfg(test)]
#[path = "config_test.rs"]
mod test;
