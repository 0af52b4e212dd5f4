use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub enum HeaderKey {
    Authorization,
    ContentType,
}

impl HeaderKey {
    fn as_str(&self) -> &'static str {
        match self {
            HeaderKey::Authorization => "Authorization",
            HeaderKey::ContentType => "Content-Type",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn into_body(self) -> Result<String> {
        if self.is_success() {
            Ok(self.body)
        } else {
            Err(Error::Transport(format!("status: {}", self.status)))
        }
    }

    pub fn parse_json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body).map_err(|e| {
            Error::Parse(format!(
                "status {}, body is not the expected json: {}",
                self.status, e
            ))
        })
    }
}

#[derive(Debug, Clone)]
pub struct Header {
    key: HeaderKey,
    value: String,
}

impl Header {
    pub fn new(key: HeaderKey, value: String) -> Self {
        Self { key, value }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Request<'a> {
    pub query: &'a [(&'a str, &'a str)],
    pub headers: Option<Vec<Header>>,
    pub body: Option<String>,
}

#[derive(Clone)]
pub struct Client {
    cli: reqwest::Client,
    dft_headers: Vec<Header>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    pub fn new() -> Self {
        Self {
            cli: reqwest::Client::new(),
            dft_headers: vec![],
        }
    }

    pub fn set_default_headers(&mut self, headers: Vec<Header>) {
        self.dft_headers = headers;
    }

    pub async fn send(&self, method: Method, url: &str, req: Request<'_>) -> Result<Response> {
        log::debug!("{} {}", method, url);

        let mut builder = self.cli.request(method, url);
        if !req.query.is_empty() {
            builder = builder.query(req.query);
        }
        builder = self.add_headers(builder, req.headers);
        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status: u16 = response.status().into();
        log::debug!("response status: {}", status);

        Ok(Response {
            status,
            body: response.text().await?,
        })
    }

    fn add_headers(
        &self,
        mut builder: reqwest::RequestBuilder,
        headers: Option<Vec<Header>>,
    ) -> reqwest::RequestBuilder {
        let mut hdrs = self.dft_headers.clone();
        if let Some(headers) = headers {
            hdrs.extend(headers);
        }

        for header in hdrs {
            builder = builder.header(header.key.as_str(), header.value.as_str());
        }

        builder
    }
}

// A simple wrapper for reqwest::get
pub async fn get(url: &str) -> Result<Response> {
    log::debug!("GET {}", url);
    let response = reqwest::get(url).await?;
    Ok(Response {
        status: response.status().into(),
        body: response.text().await?,
    })
}
