//! Native Bridge Surface
//!
//! The three operations a host platform exposes for driving the embedded
//! server, expressed as a trait so the rest of the stack can be tested
//! against a fake bridge without a real native host. [`BridgeShim`] is the
//! call-through layer the controller uses: it converts every bridge failure
//! into a sentinel value and never lets an error escape.

pub mod in_process;

pub use in_process::InProcessBridge;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::errors::Error;

/// Operations the native layer exposes for the embedded server.
///
/// A port of zero or negative denotes "not running". The bridge holds no
/// state of its own; the server is the state owner.
#[async_trait]
pub trait ServerBridge: Send + Sync {
    /// Start the embedded server, returning the port it listens on
    async fn start_server(&self) -> Result<i32, Error>;

    /// Stop the embedded server, returning whether the stop took effect
    async fn stop_server(&self) -> Result<bool, Error>;

    /// Port of the running server, or 0 when it is not running
    async fn server_port(&self) -> Result<i32, Error>;
}

/// Stateless call-through to a [`ServerBridge`].
///
/// Errors from the underlying bridge are logged and mapped to `0`/`false`;
/// callers only ever see the sentinel.
pub struct BridgeShim {
    inner: Arc<dyn ServerBridge>,
}

impl BridgeShim {
    /// Wrap a bridge implementation
    pub fn new(inner: Arc<dyn ServerBridge>) -> Self {
        Self { inner }
    }

    /// Start the server; 0 on failure
    pub async fn start_server(&self) -> i32 {
        match self.inner.start_server().await {
            Ok(port) => port,
            Err(error) => {
                warn!("bridge start_server failed: {}", error);
                0
            }
        }
    }

    /// Stop the server; false on failure
    pub async fn stop_server(&self) -> bool {
        match self.inner.stop_server().await {
            Ok(stopped) => stopped,
            Err(error) => {
                warn!("bridge stop_server failed: {}", error);
                false
            }
        }
    }

    /// Current server port; 0 on failure or when not running
    pub async fn server_port(&self) -> i32 {
        match self.inner.server_port().await {
            Ok(port) => port,
            Err(error) => {
                warn!("bridge server_port failed: {}", error);
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bridge whose every operation fails
    struct FailingBridge;

    #[async_trait]
    impl ServerBridge for FailingBridge {
        async fn start_server(&self) -> Result<i32, Error> {
            Err(Error::Bridge("native module unavailable".to_string()))
        }

        async fn stop_server(&self) -> Result<bool, Error> {
            Err(Error::Bridge("native module unavailable".to_string()))
        }

        async fn server_port(&self) -> Result<i32, Error> {
            Err(Error::Bridge("native module unavailable".to_string()))
        }
    }

    struct FixedPortBridge(i32);

    #[async_trait]
    impl ServerBridge for FixedPortBridge {
        async fn start_server(&self) -> Result<i32, Error> {
            Ok(self.0)
        }

        async fn stop_server(&self) -> Result<bool, Error> {
            Ok(true)
        }

        async fn server_port(&self) -> Result<i32, Error> {
            Ok(self.0)
        }
    }

    #[tokio::test]
    async fn failures_become_sentinels() {
        let shim = BridgeShim::new(Arc::new(FailingBridge));

        assert_eq!(shim.start_server().await, 0);
        assert!(!shim.stop_server().await);
        assert_eq!(shim.server_port().await, 0);
    }

    #[tokio::test]
    async fn successes_pass_through() {
        let shim = BridgeShim::new(Arc::new(FixedPortBridge(4242)));

        assert_eq!(shim.start_server().await, 4242);
        assert!(shim.stop_server().await);
        assert_eq!(shim.server_port().await, 4242);
    }
}
