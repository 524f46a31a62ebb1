//! `RelayServer` — Axum HTTP + WebSocket server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use banter_core::ChatRoom;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::health::{self, HealthResponse};
use crate::shutdown::ShutdownCoordinator;
use crate::websocket::broadcast::Broadcaster;
use crate::websocket::connection::next_connection_id;
use crate::websocket::session::run_ws_session;

/// The embedded chat client page served at `/`.
const INDEX_HTML: &str = include_str!("../static/index.html");

/// Shared state accessible from Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// The single global chat room.
    pub room: Arc<ChatRoom>,
    /// Connection registry and event fan-out.
    pub broadcaster: Arc<Broadcaster>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// When the server started.
    pub start_time: Instant,
    /// Prometheus render handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
}

/// The relay server.
pub struct RelayServer {
    config: Arc<ServerConfig>,
    room: Arc<ChatRoom>,
    broadcaster: Arc<Broadcaster>,
    shutdown: Arc<ShutdownCoordinator>,
    start_time: Instant,
    metrics: Option<PrometheusHandle>,
}

impl RelayServer {
    /// Create a new server.
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
            room: Arc::new(ChatRoom::new()),
            broadcaster: Arc::new(Broadcaster::new()),
            shutdown: Arc::new(ShutdownCoordinator::new()),
            start_time: Instant::now(),
            metrics: None,
        }
    }

    /// Attach an installed Prometheus recorder for `/metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Build the Axum router with all routes.
    pub fn router(&self) -> Router {
        let state = AppState {
            room: self.room.clone(),
            broadcaster: self.broadcaster.clone(),
            config: self.config.clone(),
            start_time: self.start_time,
            metrics: self.metrics.clone(),
        };

        Router::new()
            .route("/", get(index_handler))
            .route("/ws", get(ws_handler))
            .route("/health", get(health_handler))
            .route("/metrics", get(metrics_handler))
            .with_state(state)
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Bind and serve. Returns the bound address and the serve task,
    /// which runs until the shutdown coordinator is cancelled.
    pub async fn listen(&self) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
        let listener =
            TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        let addr = listener.local_addr()?;
        let router = self.router();
        let token = self.shutdown.token();

        let handle = tokio::spawn(async move {
            let serve =
                axum::serve(listener, router).with_graceful_shutdown(token.cancelled_owned());
            if let Err(e) = serve.await {
                error!(error = %e, "server task failed");
            }
        });

        info!(%addr, "relay server listening");
        Ok((addr, handle))
    }

    /// The chat room.
    pub fn room(&self) -> &Arc<ChatRoom> {
        &self.room
    }

    /// The connection registry / fan-out.
    pub fn broadcaster(&self) -> &Arc<Broadcaster> {
        &self.broadcaster
    }

    /// The shutdown coordinator.
    pub fn shutdown(&self) -> &Arc<ShutdownCoordinator> {
        &self.shutdown
    }

    /// The server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

/// GET / — the chat client page.
async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /ws — WebSocket upgrade.
///
/// Upgrades are refused with `503` once the connection cap is reached.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    if state.broadcaster.connection_count() >= state.config.max_connections {
        warn!(
            max_connections = state.config.max_connections,
            "connection cap reached, refusing upgrade"
        );
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    }

    let id = next_connection_id();
    ws.on_upgrade(move |socket| {
        run_ws_session(socket, id, state.room, state.broadcaster, state.config)
    })
}

/// GET /health
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let resp = health::health_check(
        state.start_time,
        state.broadcaster.connection_count(),
        state.room.user_count(),
    );
    Json(resp)
}

/// GET /metrics
async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics {
        Some(handle) => crate::metrics::render(&handle).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn make_server() -> RelayServer {
        RelayServer::new(ServerConfig {
            port: 0,
            ..ServerConfig::default()
        })
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let app = make_server().router();

        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), 10_000).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["connections"], 0);
        assert_eq!(parsed["users"], 0);
    }

    #[tokio::test]
    async fn index_serves_chat_page() {
        let app = make_server().router();

        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
        let page = std::str::from_utf8(&body).unwrap();
        assert!(page.contains("<html"));
        assert!(page.contains("/ws"));
    }

    #[tokio::test]
    async fn metrics_without_recorder_is_404() {
        let app = make_server().router();

        let req = Request::builder()
            .uri("/metrics")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = make_server().router();

        let req = Request::builder()
            .uri("/nonexistent")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn ws_route_rejects_plain_get() {
        let app = make_server().router();

        let req = Request::builder().uri("/ws").body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert!(resp.status().is_client_error());
    }

    #[test]
    fn accessors() {
        let server = make_server();
        assert_eq!(server.config().host, "127.0.0.1");
        assert_eq!(server.broadcaster().connection_count(), 0);
        assert_eq!(server.room().user_count(), 0);
        assert!(!server.shutdown().is_shutting_down());
    }

    #[tokio::test]
    async fn listen_binds_and_shuts_down() {
        let server = make_server();
        let (addr, handle) = server.listen().await.unwrap();
        assert_ne!(addr.port(), 0);

        let resp = reqwest::get(format!("http://{addr}/health")).await.unwrap();
        assert!(resp.status().is_success());

        server.shutdown().shutdown();
        tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("shutdown timed out")
            .expect("join error");
    }
}
