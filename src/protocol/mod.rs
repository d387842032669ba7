//! JSON-RPC 2.0 Wire Protocol
//!
//! Message structures exchanged with the embedded server, plus the
//! identifiers of the RPC methods it serves.

pub mod messages;
pub mod method;

pub use messages::{
    HealthStatus,
    JsonRpcRequest,
    JsonRpcResponse,
    RequestId,
    ResponseOutcome,
    error_response,
    success_response,
    JSONRPC_VERSION,
};
pub use method::Method;

pub use crate::errors::{ Error, ErrorData, error_codes };
