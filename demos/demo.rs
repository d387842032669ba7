use std::sync::Arc;

use pocketrpc::{ DemoController, InProcessBridge };
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = tracing_subscriber::fmt::Subscriber
        ::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    println!("Starting embedded server demo...");

    let controller = DemoController::new(Arc::new(InProcessBridge::new()));

    controller.start_server().await;
    if controller.port() > 0 {
        println!("Server running on port {}", controller.port());
    }

    controller.server_info().await;
    controller.run_rpc_suite().await;

    println!("\nResult log (oldest first):");
    for item in controller.results().await.iter().rev() {
        println!(
            "  {} [{:>7}] {}",
            item.timestamp.format("%H:%M:%S"),
            format!("{:?}", item.kind).to_lowercase(),
            item.text
        );
    }

    controller.stop_server().await;
    println!("\nServer stopped.");

    Ok(())
}
