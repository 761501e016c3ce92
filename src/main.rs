//! Application entry point and server initialization
//!
//! Loads environment configuration, prepares the upload directory and the
//! in-memory storage engine, then starts the HTTP server with graceful
//! shutdown support.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

mod error;
mod handler;
mod model;
mod route;
mod store;
mod upload;

use route::create_app;
use store::{AppState, MemStore};

/// Application entry point
///
/// # Environment Variables
///
/// - `PORT` - Server port number (default: 8080)
/// - `BASE_URL` - Public base URL used in QR links (default: "http://localhost:{PORT}")
/// - `UPLOAD_DIR` - Directory for uploaded image blobs (default: "uploads")
#[tokio::main]
async fn main() {
    // Load environment variables from .env file if it exists
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter("wedshare=debug,tower_http=debug")
        .init();

    let port_str = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let port: u16 = port_str.parse().unwrap_or(8080);

    let base_url =
        env::var("BASE_URL").unwrap_or_else(|_| format!("http://localhost:{}", port));
    let upload_dir = PathBuf::from(env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()));

    // The blob store writes into this directory; create it up front so the
    // first upload does not fail.
    std::fs::create_dir_all(&upload_dir).expect("Failed to create upload directory");

    // All entity state lives in this store for the process lifetime.
    let state = AppState {
        store: Arc::new(MemStore::new()),
        upload_dir,
        base_url,
    };

    let app = create_app(state).layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await.unwrap();

    println!("🚀 Server running at http://localhost:{}", port);

    // The server keeps running until it receives SIGTERM or SIGINT
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

/// Handles graceful shutdown signals
///
/// Returns when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received, letting
/// open connections complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    println!("\n🛑 Shutdown signal received, stopping server.");
}
