use std::net::SocketAddr;
use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api::auth::require_bearer;
use crate::api::handlers::{handle_health, handle_microtips};
use crate::tips::TipCache;

pub type Clock = fn() -> DateTime<Utc>;

pub fn system_clock() -> DateTime<Utc> {
    Utc::now()
}

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<TipCache>,
    pub api_token: Arc<str>,
    pub clock: Clock,
}

impl AppState {
    pub fn new(cache: Arc<TipCache>, api_token: &str) -> Self {
        Self {
            cache,
            api_token: Arc::from(api_token),
            clock: system_clock,
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }
}

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/microtips", post(handle_microtips))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .route("/health", get(handle_health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub struct TipServer {
    pub port: u16,
    pub state: AppState,
}

impl TipServer {
    pub fn new(port: u16, state: AppState) -> Self {
        Self { port, state }
    }

    pub async fn start(self) -> std::io::Result<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("Mood tip microservice running at http://localhost:{}", self.port);
        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
