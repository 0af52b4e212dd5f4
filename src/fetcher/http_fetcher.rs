use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::wrapper::http;

use super::Fetcher;

pub const UPTIME_ROBOT_IPS_URL: &str = "https://uptimerobot.com/inc/files/ips/IPv4andIPv6.txt";

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    url: String,
    ipv6: bool,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(UPTIME_ROBOT_IPS_URL, false)
    }
}

impl HttpFetcher {
    pub fn new(url: impl Into<String>, ipv6: bool) -> Self {
        Self {
            url: url.into(),
            ipv6,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<Vec<String>> {
        let response = http::get(&self.url).await.map_err(|e| {
            Error::Transport(format!("could not get ips from {}: {}", self.url, e))
        })?;
        let body = response.into_body().map_err(|e| {
            Error::Transport(format!("could not get ips from {}: {}", self.url, e))
        })?;

        Ok(parse_ip_list(&body, self.ipv6))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self) -> Result<Vec<String>> {
        self.fetch().await
    }
}

// IPv6 literals (anything with a `:`) are kept only when `ipv6` is set.
pub fn parse_ip_list(content: &str, ipv6: bool) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| ipv6 || !line.contains(':'))
        .map(String::from)
        .collect()
}
