//! HTTP server for the parser service

pub mod routes;
pub mod state;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::ParserConfig;
use crate::error::{Error, Result};
use state::AppState;

/// Parser HTTP Server
pub struct ParserServer {
    state: AppState,
}

impl ParserServer {
    /// Create a server backed by the configured JSON file
    pub fn new(config: ParserConfig) -> Result<Self> {
        Ok(Self {
            state: AppState::new(config)?,
        })
    }

    /// Create a server over prepared state
    pub fn with_state(state: AppState) -> Self {
        Self { state }
    }

    /// Build the router with all routes
    pub fn build_router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Start the server, returning after Ctrl+C or SIGTERM
    pub async fn start(self) -> Result<()> {
        let address = self.address();
        let addr: SocketAddr = address
            .parse()
            .map_err(|e| Error::Config(format!("Invalid address '{}': {}", address, e)))?;

        let router = self.build_router();

        tracing::info!("Starting parser server on http://{}", addr);
        tracing::info!("Session store: {}", self.state.store().name());

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Config(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| Error::internal(format!("Server error: {}", e)))?;

        tracing::info!("Parser server stopped");
        Ok(())
    }

    /// Get the server address
    pub fn address(&self) -> String {
        self.state.config().address()
    }
}

/// Assemble API routes, static files and middleware around `state`
pub fn build_router(state: AppState) -> Router {
    let config = state.config().clone();
    let static_root = config.static_files.root.clone();
    let index = config.static_files.index_path();

    let router = Router::new()
        .route("/health", get(routes::health))
        .nest("/api", routes::api_routes(config.server.max_upload_size))
        .with_state(state)
        .route_service("/", ServeFile::new(index))
        .fallback_service(ServeDir::new(static_root))
        // Middleware layers (order matters - applied bottom to top)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new());

    if config.server.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE]);
        // CorsLayer only reports methods and headers on preflight
        router
            .layer(cors)
            .layer(SetResponseHeaderLayer::if_not_present(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, POST, OPTIONS"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("content-type"),
            ))
    } else {
        router
    }
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to register SIGTERM handler: {}", e);
                ctrl_c.await.ok();
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
    }

    tracing::info!("Shutdown signal received");
}


#[cfg(test)]
mod tests {
    use super::test_support::{get, router_with};
    use super::*;
    use crate::storage::MemoryStore;
    use axum::{body::Body, http::Request, http::StatusCode};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn static_router(root: &std::path::Path) -> Router {
        let mut config = ParserConfig::default();
        config.static_files.root = root.to_path_buf();
        build_router(AppState::with_store(config, Arc::new(MemoryStore::new())))
    }

    #[tokio::test]
    async fn test_health() {
        let router = router_with(Arc::new(MemoryStore::new()));

        let (status, body) = get(&router, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "KrushFlow Document Parser API");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_server_over_prepared_state() {
        let mut config = ParserConfig::default();
        config.server.port = 5055;
        let server =
            ParserServer::with_state(AppState::with_store(config, Arc::new(MemoryStore::new())));
        assert_eq!(server.address(), "0.0.0.0:5055");

        let response = server
            .build_router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_info() {
        let router = router_with(Arc::new(MemoryStore::new()));

        let (status, body) = get(&router, "/api/info").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "krushflow-parser");
        assert!(body["endpoints"]["POST /api/parse"].is_string());
    }

    #[tokio::test]
    async fn test_static_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("parser.html"), "<h1>KrushFlow</h1>").unwrap();
        std::fs::write(dir.path().join("parser.js"), "console.log(1);").unwrap();
        let router = static_router(dir.path());

        let response = router
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"<h1>KrushFlow</h1>");

        let response = router
            .clone()
            .oneshot(Request::get("/parser.js").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(Request::get("/missing.css").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_headers() {
        let router = router_with(Arc::new(MemoryStore::new()));

        let response = router
            .clone()
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "*"
        );

        // Plain requests carry all three headers, with or without an Origin
        let response = router
            .clone()
            .oneshot(Request::get("/api/data").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, OPTIONS"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "content-type");

        let preflight = router
            .oneshot(
                Request::options("/api/parse")
                    .header(header::ORIGIN, "http://example.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(preflight.status(), StatusCode::OK);
        let methods = preflight.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
            .to_str()
            .unwrap()
            .to_string();
        assert!(methods.contains("POST"));
        assert!(methods.contains("OPTIONS"));
        assert_eq!(
            preflight.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "content-type"
        );
    }

    #[tokio::test]
    async fn test_cors_disabled() {
        let mut config = ParserConfig::default();
        config.server.enable_cors = false;
        let router = build_router(AppState::with_store(config, Arc::new(MemoryStore::new())));

        let response = router
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .is_none());
    }
}
