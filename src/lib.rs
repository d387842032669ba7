//! pocketrpc
//!
//! This crate is a self-contained rendition of an embedded-server demo: a
//! small local HTTP/JSON-RPC server, the native-bridge surface that drives
//! its lifecycle, a typed JSON-RPC client, and a controller that records
//! every outcome in a bounded result log. The bridge is a trait, so the
//! client and controller stack can be exercised against a fake bridge with
//! no server or native host behind it.

// Re-export core components
pub mod bridge;
pub mod client;
pub mod controller;
pub mod errors;
pub mod protocol;
pub mod server;

// Re-export commonly used items
pub use bridge::{ BridgeShim, InProcessBridge, ServerBridge };
pub use client::{ HttpTransport, JsonRpcClient, ReqwestTransport };
pub use controller::{ DemoController, ResultItem, ResultKind };
pub use errors::Error;
pub use server::{ ServerHandle, ServerOptions };
