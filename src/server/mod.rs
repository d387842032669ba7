//! Embedded Local Server
//!
//! A small HTTP server bound to an ephemeral loopback port, serving the
//! JSON-RPC endpoint at `/jsonrpc` and a REST-style health check at
//! `/health`. The bridge layer owns its lifecycle; everything here is
//! request handling.

mod dispatch;

use std::sync::Arc;

use axum::{ Json, Router, extract::State, routing::{ get, post } };
use http::{ Method as HttpMethod, StatusCode };
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::cors::{ Any, CorsLayer };
use tracing::{ error, info };

use crate::errors::{ Error, error_codes };
use crate::protocol::{ HealthStatus, JsonRpcRequest, JsonRpcResponse, error_response };

/// Configuration options for the embedded server
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Address to bind; port 0 picks an ephemeral port
    pub bind_address: String,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:0".to_string(),
        }
    }
}

/// Shared state handed to the request handlers
struct AppState {
    /// Port the listener actually bound
    port: u16,
}

/// Handle to a running embedded server
pub struct ServerHandle {
    port: u16,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl ServerHandle {
    /// Port the server is listening on
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Stop the server gracefully and wait for it to wind down
    pub async fn shutdown(self) -> Result<(), Error> {
        // Receiver already gone means the serve task has exited on its own.
        let _ = self.shutdown_tx.send(());
        self.task.await.map_err(|e| Error::Server(format!("server task failed: {}", e)))
    }
}

/// Bind and start serving, returning a handle with the bound port
pub async fn start(options: ServerOptions) -> Result<ServerHandle, Error> {
    let listener = TcpListener::bind(&options.bind_address).await?;
    let port = listener.local_addr()?.port();

    let state = Arc::new(AppState { port });

    // Webview clients call in cross-origin, so the RPC route stays permissive.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([HttpMethod::POST, HttpMethod::OPTIONS])
        .allow_headers(Any);

    let app = Router::new()
        .route("/jsonrpc", post(handle_jsonrpc))
        .route("/health", get(handle_health))
        .layer(cors)
        .with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        info!("embedded server listening on port {}", port);
        let serve = axum
            ::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
        if let Err(e) = serve.await {
            error!("embedded server error: {}", e);
        }
    });

    Ok(ServerHandle { port, shutdown_tx, task })
}

async fn handle_health(State(state): State<Arc<AppState>>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        port: state.port.to_string(),
    })
}

async fn handle_jsonrpc(body: String) -> (StatusCode, Json<JsonRpcResponse>) {
    // An unparseable body gets HTTP 400; every decoded request, including
    // invalid ones, is answered 200 with an in-band error object.
    let request: JsonRpcRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(error_response(None, error_codes::PARSE_ERROR, "Parse error", None)),
            );
        }
    };

    (StatusCode::OK, Json(dispatch::process_request(request)))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::JsonRpcClient;
    use crate::errors::Error;

    async fn running_server() -> (ServerHandle, JsonRpcClient) {
        let handle = start(ServerOptions::default()).await.unwrap();
        let client = JsonRpcClient::new(&format!("http://127.0.0.1:{}", handle.port())).unwrap();
        (handle, client)
    }

    #[tokio::test]
    async fn serves_all_four_methods() {
        let (handle, client) = running_server().await;

        let greeting = client.get_greeting("HTTP Client").await.unwrap();
        assert_eq!(greeting, "Hello HTTP Client from Rust!");

        let time = client.get_current_time().await.unwrap();
        assert_eq!(time.len(), "2026-01-02 15:04:05".len());

        let sum = client.calculate(25.0, 17.0).await.unwrap();
        assert_eq!(sum, 42);

        let info = client.get_system_info().await.unwrap();
        assert!(info.contains(std::env::consts::OS));

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn health_reports_bound_port() {
        let (handle, client) = running_server().await;

        let health = client.check_health().await.unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.port, handle.port().to_string());

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn unknown_method_yields_method_not_found() {
        let (handle, client) = running_server().await;

        let error = client.call("fetchWeather", None).await.unwrap_err();
        match error {
            Error::Rpc { code, message, .. } => {
                assert_eq!(code, error_codes::METHOD_NOT_FOUND);
                assert_eq!(message, "Method not found");
            }
            other => panic!("expected RPC error, got {:?}", other),
        }

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn bad_params_yield_invalid_params() {
        let (handle, client) = running_server().await;

        let error = client.call("getGreeting", Some(json!({ "who": "nobody" }))).await.unwrap_err();
        assert!(matches!(error, Error::Rpc { code, .. } if code == error_codes::INVALID_PARAMS));

        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error_with_http_400() {
        let (handle, client) = running_server().await;

        let url = format!("http://127.0.0.1:{}/jsonrpc", handle.port());
        let response = reqwest::Client
            ::new()
            .post(&url)
            .header("content-type", "application/json")
            .body("{not json")
            .send().await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        let body: JsonRpcResponse = serde_json::from_str(&response.text().await.unwrap()).unwrap();
        let error = body.error().expect("error body");
        assert_eq!(error.code, error_codes::PARSE_ERROR);
        assert_eq!(body.id, None);

        drop(client);
        handle.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn wrong_protocol_version_is_invalid_request() {
        let (handle, client) = running_server().await;

        let url = format!("http://127.0.0.1:{}/jsonrpc", handle.port());
        let response = reqwest::Client
            ::new()
            .post(&url)
            .json(&json!({ "jsonrpc": "1.0", "method": "getCurrentTime", "id": 9 }))
            .send().await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        let body: JsonRpcResponse = serde_json::from_str(&response.text().await.unwrap()).unwrap();
        let error = body.error().expect("error body");
        assert_eq!(error.code, error_codes::INVALID_REQUEST);

        drop(client);
        handle.shutdown().await.unwrap();
    }
}
