//! JSON-RPC 2.0 message structures
//!
//! This module defines the request and response envelopes exchanged with the
//! embedded server, providing serialization and deserialization between JSON
//! and Rust types.

use std::fmt;

use schemars::JsonSchema;
use serde::{ Deserialize, Serialize };
use serde_json::Value;

use crate::errors::ErrorData;

/// Protocol version tag carried by every request and response
pub const JSONRPC_VERSION: &str = "2.0";

/// Request/response correlation id
///
/// The client always issues numeric ids; string ids are accepted on the way
/// back in so responses from foreign clients still parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RequestId {
    /// Numeric id
    Number(i64),
    /// String id
    String(String),
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{}", n),
            RequestId::String(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RequestId {
    fn from(id: i64) -> Self {
        RequestId::Number(id)
    }
}

/// A JSON-RPC 2.0 request message
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JsonRpcRequest {
    /// JSON-RPC version, always "2.0"
    pub jsonrpc: String,
    /// Method name (e.g., "getGreeting"); empty when the request omitted it
    #[serde(default)]
    pub method: String,
    /// Method-specific parameters, omitted from the wire when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Request id for matching responses; absent only in malformed requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
}

impl JsonRpcRequest {
    /// Create a request with a numeric id
    pub fn new(id: i64, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id: Some(RequestId::Number(id)),
        }
    }
}

/// A JSON-RPC 2.0 response message
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct JsonRpcResponse {
    /// JSON-RPC version, always "2.0"
    pub jsonrpc: String,
    /// Either a result or an error
    #[serde(flatten)]
    pub outcome: ResponseOutcome,
    /// Echoed request id; null when the request could not be parsed
    #[serde(default)]
    pub id: Option<RequestId>,
}

/// Either a successful result or an error
///
/// `Error` is listed first so a malformed body carrying both keys resolves to
/// the error; the result is ignored in that case.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ResponseOutcome {
    /// Error case with error details
    Error {
        error: ErrorData,
    },
    /// Success case with a result
    Success {
        result: Value,
    },
}

impl JsonRpcResponse {
    /// The result value, if this is a success response
    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            ResponseOutcome::Success { result } => Some(result),
            ResponseOutcome::Error { .. } => None,
        }
    }

    /// The error data, if this is an error response
    pub fn error(&self) -> Option<&ErrorData> {
        match &self.outcome {
            ResponseOutcome::Error { error } => Some(error),
            ResponseOutcome::Success { .. } => None,
        }
    }

    /// Unwrap into the raw result value, converting an error body into
    /// [`crate::Error::Rpc`]
    pub fn into_result(self) -> Result<Value, crate::Error> {
        match self.outcome {
            ResponseOutcome::Success { result } => Ok(result),
            ResponseOutcome::Error { error } => Err(error.into()),
        }
    }
}

/// Build a success response echoing the given id
pub fn success_response(id: Option<RequestId>, result: Value) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: JSONRPC_VERSION.to_string(),
        outcome: ResponseOutcome::Success { result },
        id,
    }
}

/// Build an error response echoing the given id
pub fn error_response(
    id: Option<RequestId>,
    code: i32,
    message: &str,
    data: Option<Value>
) -> JsonRpcResponse {
    JsonRpcResponse {
        jsonrpc: JSONRPC_VERSION.to_string(),
        outcome: ResponseOutcome::Error {
            error: ErrorData {
                code,
                message: message.to_string(),
                data,
            },
        },
        id,
    }
}

/// Payload of the REST-style `GET /health` endpoint
///
/// The port is a string on the wire, matching the embedded server.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HealthStatus {
    /// Health indicator, "ok" while serving
    pub status: String,
    /// Port the server is listening on
    pub port: String,
}
