//! HTTP transport abstraction for the JSON-RPC client
//!
//! The client talks to the embedded server through this trait so tests can
//! substitute a mock transport without a real server or native host.

use async_trait::async_trait;
use http::StatusCode;
use serde_json::Value;
use url::Url;

use crate::errors::Error;

/// A raw HTTP exchange result: status plus the unparsed body
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code of the response
    pub status: StatusCode,
    /// Response body as received
    pub body: String,
}

/// Transport trait for the client's two HTTP call shapes
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// POST a JSON body and return the raw response
    async fn post_json(&self, url: &Url, body: &Value) -> Result<HttpResponse, Error>;

    /// Plain GET returning the raw response
    async fn get(&self, url: &Url) -> Result<HttpResponse, Error>;
}

/// Production transport backed by a [`reqwest::Client`]
///
/// No retries and no explicit timeout; failure semantics are whatever the
/// underlying client defaults to.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a fresh connection pool
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, url: &Url, body: &Value) -> Result<HttpResponse, Error> {
        let response = self.client.post(url.clone()).json(body).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }

    async fn get(&self, url: &Url) -> Result<HttpResponse, Error> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}
