//! In-process bridge over the embedded server
//!
//! Plays the role the platform native module plays on a phone: owns the
//! server lifecycle behind the three bridge operations.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use crate::bridge::ServerBridge;
use crate::errors::Error;
use crate::server::{ self, ServerHandle, ServerOptions };

/// [`ServerBridge`] that starts and stops the embedded server in this process.
///
/// Start is idempotent: starting while running returns the current port.
/// Stop is idempotent as well.
pub struct InProcessBridge {
    options: ServerOptions,
    server: Mutex<Option<ServerHandle>>,
}

impl InProcessBridge {
    /// Bridge over a server with default options (ephemeral loopback port)
    pub fn new() -> Self {
        Self::with_options(ServerOptions::default())
    }

    /// Bridge over a server with the given options
    pub fn with_options(options: ServerOptions) -> Self {
        Self {
            options,
            server: Mutex::new(None),
        }
    }
}

impl Default for InProcessBridge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ServerBridge for InProcessBridge {
    async fn start_server(&self) -> Result<i32, Error> {
        let mut guard = self.server.lock().await;

        if let Some(handle) = guard.as_ref() {
            info!("embedded server already running on port {}", handle.port());
            return Ok(handle.port() as i32);
        }

        let handle = server::start(self.options.clone()).await?;
        let port = handle.port() as i32;
        *guard = Some(handle);
        Ok(port)
    }

    async fn stop_server(&self) -> Result<bool, Error> {
        let mut guard = self.server.lock().await;

        match guard.take() {
            Some(handle) => {
                handle.shutdown().await?;
                info!("embedded server stopped");
                Ok(true)
            }
            None => Ok(true),
        }
    }

    async fn server_port(&self) -> Result<i32, Error> {
        let guard = self.server.lock().await;
        Ok(guard.as_ref().map(|handle| handle.port() as i32).unwrap_or(0))
    }
}
