//! Error Types
//!
//! This module defines the error type shared by the bridge, client, server,
//! and controller layers, along with the standard JSON-RPC 2.0 error codes
//! the embedded server answers with.

use schemars::JsonSchema;
use serde::{ Deserialize, Serialize };
use thiserror::Error;

/// Error data carried by a JSON-RPC error response
#[derive(Serialize, Deserialize, Debug, Clone, JsonSchema)]
pub struct ErrorData {
    /// Error code
    pub code: i32,
    /// Error message
    pub message: String,
    /// Optional additional data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// The main Error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP connection-level failures
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid base or endpoint URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The transport answered with a non-success HTTP status
    #[error("Transport error: HTTP status {0}")]
    Status(u16),

    /// The response body carried a JSON-RPC error object
    #[error("RPC error {code}: {message}")]
    Rpc {
        code: i32,
        message: String,
        data: Option<serde_json::Value>,
    },

    /// Native bridge call failed
    #[error("Bridge error: {0}")]
    Bridge(String),

    /// Protocol errors (e.g., invalid message format)
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Embedded server lifecycle failures
    #[error("Server error: {0}")]
    Server(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

/// Standard JSON-RPC 2.0 error codes
pub mod error_codes {
    /// Parse error
    pub const PARSE_ERROR: i32 = -32700;
    /// Invalid request
    pub const INVALID_REQUEST: i32 = -32600;
    /// Method not found
    pub const METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid params
    pub const INVALID_PARAMS: i32 = -32602;
    /// Internal error
    pub const INTERNAL_ERROR: i32 = -32603;
}

impl Error {
    /// Error code of the RPC error this maps to on the wire
    pub fn to_code(&self) -> i32 {
        use error_codes::*;
        match self {
            Error::Json(_) => PARSE_ERROR,
            Error::Protocol(_) => INVALID_REQUEST,
            Error::Rpc { code, .. } => *code,
            _ => INTERNAL_ERROR,
        }
    }
}

impl From<ErrorData> for Error {
    fn from(data: ErrorData) -> Self {
        Error::Rpc {
            code: data.code,
            message: data.message,
            data: data.data,
        }
    }
}
