//! Demo Controller
//!
//! Orchestrates the demo flow: start the embedded server through the bridge
//! shim, derive a JSON-RPC client from the returned port, and drive the two
//! demo actions, recording every outcome in the bounded result log. Each
//! action is guarded by its own busy flag; the two actions are not mutually
//! exclusive with each other.

pub mod results;

pub use results::{ MAX_RESULTS, ResultItem, ResultKind, ResultLog };

use std::sync::Arc;
use std::sync::atomic::{ AtomicBool, AtomicI32, Ordering };

use scopeguard::defer;
use tokio::sync::{ Mutex, RwLock };
use tracing::debug;

use crate::bridge::{ BridgeShim, ServerBridge };
use crate::client::JsonRpcClient;
use crate::errors::Error;

/// Name sent with the demo greeting call
const DEMO_CALLER: &str = "HTTP Client";

/// Controller owning the result log and the bridge-derived client
pub struct DemoController {
    bridge: BridgeShim,
    client: RwLock<Option<Arc<JsonRpcClient>>>,
    results: Mutex<ResultLog>,
    server_port: AtomicI32,
    info_busy: AtomicBool,
    rpc_busy: AtomicBool,
}

impl DemoController {
    /// Build a controller over the given bridge
    pub fn new(bridge: Arc<dyn ServerBridge>) -> Self {
        Self {
            bridge: BridgeShim::new(bridge),
            client: RwLock::new(None),
            results: Mutex::new(ResultLog::new()),
            server_port: AtomicI32::new(0),
            info_busy: AtomicBool::new(false),
            rpc_busy: AtomicBool::new(false),
        }
    }

    /// Start the embedded server and bind a client to its port.
    ///
    /// A non-positive port means the server did not start; no client is
    /// constructed in that case.
    pub async fn start_server(&self) {
        let port = self.bridge.start_server().await;
        self.server_port.store(port, Ordering::SeqCst);

        if port > 0 {
            match JsonRpcClient::new(&format!("http://127.0.0.1:{}", port)) {
                Ok(client) => {
                    *self.client.write().await = Some(Arc::new(client));
                    self.add_result(
                        format!("Server started on port {}", port),
                        ResultKind::Success
                    ).await;
                }
                Err(error) => {
                    self.add_result(format!("Server error: {}", error), ResultKind::Error).await;
                }
            }
        } else {
            self.add_result("Failed to start server", ResultKind::Error).await;
        }
    }

    /// Stop the embedded server and drop the client
    pub async fn stop_server(&self) {
        if self.bridge.stop_server().await {
            *self.client.write().await = None;
            self.server_port.store(0, Ordering::SeqCst);
            self.add_result("Server stopped", ResultKind::Info).await;
        } else {
            self.add_result("Failed to stop server", ResultKind::Error).await;
        }
    }

    /// Demo action: query the bridge for the server port and log the state.
    ///
    /// A no-op while a previous invocation of this action is still running.
    pub async fn server_info(&self) {
        if self.info_busy.compare_exchange(
            false,
            true,
            Ordering::SeqCst,
            Ordering::SeqCst
        ).is_err() {
            debug!("server_info already running, ignoring invocation");
            return;
        }
        defer! {
            self.info_busy.store(false, Ordering::SeqCst);
        }

        let port = self.bridge.server_port().await;
        self.add_result(format!("Server port: {}", port), ResultKind::Success).await;

        if port > 0 {
            self.add_result(
                format!("JSON-RPC server is running on port {}", port),
                ResultKind::Info
            ).await;
        } else {
            self.add_result("JSON-RPC server is not running", ResultKind::Info).await;
        }
    }

    /// Demo action: run the fixed five-call RPC sequence.
    ///
    /// A no-op while a previous invocation of this action is still running.
    /// Without an active client it records an error entry and returns. The
    /// first failing call records one error entry and aborts the rest.
    pub async fn run_rpc_suite(&self) {
        if self.rpc_busy.compare_exchange(
            false,
            true,
            Ordering::SeqCst,
            Ordering::SeqCst
        ).is_err() {
            debug!("rpc suite already running, ignoring invocation");
            return;
        }
        defer! {
            self.rpc_busy.store(false, Ordering::SeqCst);
        }

        let client = self.client.read().await.clone();
        let Some(client) = client else {
            self.add_result("Server not running", ResultKind::Error).await;
            return;
        };

        if let Err(error) = self.rpc_sequence(&client).await {
            self.add_result(format!("API error: {}", error), ResultKind::Error).await;
        }
    }

    async fn rpc_sequence(&self, client: &JsonRpcClient) -> Result<(), Error> {
        let health = client.check_health().await?;
        self.add_result(format!("Health: {}", health.status), ResultKind::Success).await;

        let greeting = client.get_greeting(DEMO_CALLER).await?;
        self.add_result(format!("API Greeting: {}", greeting), ResultKind::Success).await;

        let time = client.get_current_time().await?;
        self.add_result(format!("API Time: {}", time), ResultKind::Success).await;

        let sum = client.calculate(25.0, 17.0).await?;
        self.add_result(format!("25 + 17 = {}", sum), ResultKind::Success).await;

        let info = client.get_system_info().await?;
        self.add_result(format!("API System: {}", info), ResultKind::Success).await;

        Ok(())
    }

    /// Drop all logged results
    pub async fn clear_results(&self) {
        self.results.lock().await.clear();
    }

    /// Snapshot of the result log, most recent first
    pub async fn results(&self) -> Vec<ResultItem> {
        self.results.lock().await.snapshot()
    }

    /// Last port reported by a start attempt; 0 when not running
    pub fn port(&self) -> i32 {
        self.server_port.load(Ordering::SeqCst)
    }

    /// Whether a client is currently bound to a running server
    pub async fn has_client(&self) -> bool {
        self.client.read().await.is_some()
    }

    async fn add_result(&self, text: impl Into<String>, kind: ResultKind) {
        let text = text.into();
        debug!(?kind, "{}", text);
        self.results.lock().await.push(text, kind);
    }
}
