//! JSON-RPC Client
//!
//! This module provides the client side of the embedded server's wire
//! contract: a generic `call` plus typed per-method wrappers, with the HTTP
//! layer behind a transport trait so it can be mocked in tests.

pub mod client;
pub mod transport;

pub use client::JsonRpcClient;
pub use transport::{ HttpResponse, HttpTransport, ReqwestTransport };

#[cfg(test)]
pub mod tests;
