use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ApiErrors, ApiOperation, Error, Result};
use crate::types::ApiMessage;
use crate::wrapper::http::{Client, Header, HeaderKey, Request};

pub const CF_API_BASE: &str = "https://api.cloudflare.com/client/v4";

#[derive(Debug, Clone, Deserialize)]
pub struct CfResponse {
    pub success: bool,

    #[serde(default)]
    pub result: Option<serde_json::Value>,

    #[serde(default)]
    pub result_info: Option<CfResultInfo>,

    #[serde(default)]
    pub errors: Option<Vec<ApiMessage>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CfResultInfo {
    #[serde(default)]
    pub cursors: Option<CfCursors>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CfCursors {
    #[serde(default)]
    pub after: Option<String>,
}

impl CfResponse {
    // An empty cursor also ends the walk.
    pub fn next_cursor(&self) -> Option<&str> {
        self.result_info
            .as_ref()
            .and_then(|info| info.cursors.as_ref())
            .and_then(|cursors| cursors.after.as_deref())
            .filter(|after| !after.is_empty())
    }

    pub fn failure(self, operation: ApiOperation) -> Error {
        log::error!("{} failed: {:?}", operation, self.errors);
        Error::ApiCallFailed {
            operation,
            errors: ApiErrors(self.errors.unwrap_or_default()),
        }
    }

    pub fn into_result<T: DeserializeOwned>(self) -> Result<T> {
        match self.result {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Err(Error::Parse("response carries no result".to_string())),
        }
    }

    pub fn into_result_or_default<T: DeserializeOwned + Default>(self) -> Result<T> {
        match self.result {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(T::default()),
        }
    }
}

#[derive(Clone)]
pub struct CfClient {
    base_url: String,
    cli: Client,
}

impl CfClient {
    pub fn new(api_token: &str) -> Self {
        Self::with_base_url(api_token, CF_API_BASE)
    }

    pub fn with_base_url(api_token: &str, base_url: &str) -> Self {
        let mut cli = Client::new();
        cli.set_default_headers(vec![
            Header::new(HeaderKey::Authorization, format!("Bearer {}", api_token)),
            Header::new(HeaderKey::ContentType, "application/json".to_string()),
        ]);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cli,
        }
    }

    pub async fn request<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<CfResponse>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let body = match body {
            Some(b) => Some(serde_json::to_string(b)?),
            None => None,
        };

        let resp = self
            .cli
            .send(
                method,
                &url,
                Request {
                    query,
                    headers: None,
                    body,
                },
            )
            .await?;

        resp.parse_json()
    }

    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<CfResponse> {
        self.request::<()>(Method::GET, path, query, None).await
    }

    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<CfResponse> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<CfResponse> {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn delete<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<CfResponse> {
        self.request(Method::DELETE, path, &[], body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_cursor() {
        let resp: CfResponse = serde_json::from_str(
            r#"{"success": true, "result": [], "result_info": {"cursors": {"before": "x", "after": "yyy"}}}"#,
        )
        .unwrap();
        assert_eq!(resp.next_cursor(), Some("yyy"));

        for body in [
            r#"{"success": true, "result": []}"#,
            r#"{"success": true, "result": [], "result_info": {"cursors": {}}}"#,
            r#"{"success": true, "result": [], "result_info": {"cursors": {"after": ""}}}"#,
            r#"{"success": true, "result": [], "result_info": {"cursors": {"after": null}}}"#,
        ] {
            let resp: CfResponse = serde_json::from_str(body).unwrap();
            assert_eq!(resp.next_cursor(), None, "{}", body);
        }
    }

    #[test]
    fn test_envelope_failure() {
        let resp: CfResponse = serde_json::from_str(
            r#"{"success": false, "result": null, "errors": [{"code": 10000, "message": "Authentication error"}]}"#,
        )
        .unwrap();
        assert!(resp.result.is_none());

        match resp.failure(ApiOperation::ListsFetch) {
            Error::ApiCallFailed { operation, errors } => {
                assert_eq!(operation, ApiOperation::ListsFetch);
                assert_eq!(errors.0[0].code, 10000);
            }
            e => panic!("unexpected error: {:?}", e),
        }
    }

    #[test]
    fn test_envelope_result() {
        let resp: CfResponse =
            serde_json::from_str(r#"{"success": true, "result": {"operation_id": "op-1"}}"#)
                .unwrap();
        let v: serde_json::Value = resp.into_result().unwrap();
        assert_eq!(v["operation_id"], "op-1");

        let resp: CfResponse = serde_json::from_str(r#"{"success": true, "result": null}"#).unwrap();
        assert!(matches!(
            resp.clone().into_result::<serde_json::Value>(),
            Err(Error::Parse(_))
        ));
        let items: Vec<serde_json::Value> = resp.into_result_or_default().unwrap();
        assert!(items.is_empty());
    }
}
