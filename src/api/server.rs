//! Router, middleware stack and server lifecycle.

use axum::Router;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use std::any::Any;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::db::Database;
use crate::error::ApiError;

/// State shared across handlers.
#[derive(Clone)]
pub struct AppState {
    db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }
}

/// Render a handler panic as the generic 500 envelope.
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    ApiError::internal(format!("handler panicked: {detail}")).into_response()
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    // Configure CORS to allow any origin
    let cors = CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any);

    Router::new()
        .route("/", get(handlers::list_todos))
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .route("/todos/{id}/complete", put(handlers::toggle_todo))
        .route("/health", get(handlers::health))
        // Innermost, so panic responses still pass through CORS and tracing
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router over the given store.
pub fn app(db: Database) -> Router {
    build_router(AppState::new(db))
}

/// Handle for a running server.
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<std::io::Result<()>>,
}

impl ServerHandle {
    /// The address the server is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Signal the server to stop accepting connections. Idempotent.
    pub fn trigger_shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Wait for the serve task to finish.
    ///
    /// Returns early, with the serve error if any, when the server dies
    /// without a shutdown having been requested.
    pub async fn wait(&mut self) -> anyhow::Result<()> {
        (&mut self.task).await??;
        Ok(())
    }

    /// Stop accepting connections and wait for in-flight requests to finish.
    pub async fn shutdown(mut self) -> anyhow::Result<()> {
        self.trigger_shutdown();
        self.wait().await
    }
}

/// Bind `host:port` and serve the API in a background task.
pub async fn start_server(db: Database, host: &str, port: u16) -> anyhow::Result<ServerHandle> {
    let listener = TcpListener::bind((host, port)).await?;
    let addr = listener.local_addr()?;
    let router = app(db);

    info!("Server is listening on http://{}", addr);

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    // Serve in the background; dropping or firing the sender starts the drain
    let task = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("Server shutting down");
            })
            .await
    });

    Ok(ServerHandle {
        addr,
        shutdown_tx: Some(shutdown_tx),
        task,
    })
}
