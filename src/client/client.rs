//! JSON-RPC client core implementation
//!
//! This module implements the client that issues numbered JSON-RPC requests
//! against the embedded server's `/jsonrpc` endpoint and the REST-style
//! `/health` check, unwrapping result/error bodies into typed values.

use std::sync::Arc;
use std::sync::atomic::{ AtomicI64, Ordering };

use serde::de::DeserializeOwned;
use serde_json::{ Value, json };
use tracing::debug;
use url::Url;

use crate::client::transport::{ HttpTransport, ReqwestTransport };
use crate::errors::Error;
use crate::protocol::{ HealthStatus, JsonRpcRequest, JsonRpcResponse, Method };

/// Client for the embedded server's JSON-RPC and health endpoints
///
/// Request ids increase monotonically per instance, starting at 1, and are
/// never reused while the client lives.
pub struct JsonRpcClient {
    /// Base URL the endpoint paths are joined onto
    base_url: Url,
    /// The transport used for communication
    transport: Arc<dyn HttpTransport>,
    /// Counter for generating request ids
    request_id: AtomicI64,
}

impl JsonRpcClient {
    /// Create a client bound to the given base URL using the default
    /// [`ReqwestTransport`]
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_transport(base_url, Arc::new(ReqwestTransport::new()))
    }

    /// Create a client with a caller-supplied transport
    pub fn with_transport(
        base_url: &str,
        transport: Arc<dyn HttpTransport>
    ) -> Result<Self, Error> {
        Ok(Self {
            base_url: Url::parse(base_url)?,
            transport,
            request_id: AtomicI64::new(1),
        })
    }

    /// Base URL this client is bound to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Claim the next request id
    fn next_request_id(&self) -> i64 {
        self.request_id.fetch_add(1, Ordering::SeqCst)
    }

    fn endpoint(&self, path: &str) -> Result<Url, Error> {
        self.base_url.join(path).map_err(Error::from)
    }

    /// Issue a generic JSON-RPC call and return the raw result value
    ///
    /// A non-success HTTP status fails with [`Error::Status`] before the body
    /// is inspected; an error object in the body fails with [`Error::Rpc`].
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, Error> {
        let id = self.next_request_id();
        let request = JsonRpcRequest::new(id, method, params);
        debug!(method, id, "issuing JSON-RPC call");

        let url = self.endpoint("/jsonrpc")?;
        let body = serde_json::to_value(&request)?;
        let response = self.transport.post_json(&url, &body).await?;

        if !response.status.is_success() {
            return Err(Error::Status(response.status.as_u16()));
        }

        let parsed: JsonRpcResponse = serde_json::from_str(&response.body)?;
        parsed.into_result()
    }

    /// Call a known method and decode the result into a concrete type
    async fn call_typed<T: DeserializeOwned>(
        &self,
        method: Method,
        params: Option<Value>
    ) -> Result<T, Error> {
        let result = self.call(method.as_str(), params).await?;
        serde_json::from_value(result).map_err(Error::from)
    }

    /// Greet the given name
    pub async fn get_greeting(&self, name: &str) -> Result<String, Error> {
        self.call_typed(Method::GetGreeting, Some(json!({ "name": name }))).await
    }

    /// Server-local wall-clock time as a formatted string
    pub async fn get_current_time(&self) -> Result<String, Error> {
        self.call_typed(Method::GetCurrentTime, None).await
    }

    /// Add two numbers on the server
    pub async fn calculate(&self, a: f64, b: f64) -> Result<i64, Error> {
        self.call_typed(Method::Calculate, Some(json!({ "a": a, "b": b }))).await
    }

    /// One-line description of the server's host runtime
    pub async fn get_system_info(&self) -> Result<String, Error> {
        self.call_typed(Method::GetSystemInfo, None).await
    }

    /// Hit the REST-style health endpoint (no JSON-RPC envelope)
    pub async fn check_health(&self) -> Result<HealthStatus, Error> {
        let url = self.endpoint("/health")?;
        let response = self.transport.get(&url).await?;

        if !response.status.is_success() {
            return Err(Error::Status(response.status.as_u16()));
        }

        serde_json::from_str(&response.body).map_err(Error::from)
    }
}
