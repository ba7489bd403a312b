//! Web server for PICCULL.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::{PiccullError, Result};

use super::handlers::AppState;
use super::router::{
    create_health_router, create_router, create_static_router, create_swagger_router,
};

/// Web server for the API.
pub struct WebServer {
    /// Server address.
    addr: SocketAddr,
    /// Application state.
    app_state: Arc<AppState>,
    /// CORS origins.
    cors_origins: Vec<String>,
    /// Whether to serve the static front end.
    serve_static: bool,
    /// Static front end directory.
    static_path: String,
}

impl WebServer {
    /// Create a new web server from configuration.
    ///
    /// Creates the thumbnail cache directory as a side effect.
    pub fn new(config: &Config) -> Result<Self> {
        let addr = format!("{}:{}", config.server.host, config.server.port)
            .parse()
            .map_err(|e| {
                PiccullError::Validation(format!("invalid web server address: {e}"))
            })?;

        let app_state = AppState::new(&config.photos.base_dir, &config.photos.cache_dir)?;

        tracing::info!(
            photos_dir = %config.photos.base_dir,
            cache_dir = %config.photos.cache_dir,
            "Photo services initialized"
        );

        Ok(Self {
            addr,
            app_state: Arc::new(app_state),
            cors_origins: config.server.cors_origins.clone(),
            serve_static: config.server.serve_static,
            static_path: config.server.static_path.clone(),
        })
    }

    /// Get the server address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Build the full router: API, health, Swagger UI and optional static
    /// front end.
    fn build_router(&self) -> Router {
        let mut router = create_router(self.app_state.clone(), &self.cors_origins)
            .merge(create_health_router())
            .merge(create_swagger_router());

        if self.serve_static {
            if let Some(static_router) = create_static_router(&self.static_path) {
                router = router.merge(static_router);
            }
        }

        router
    }

    /// Run the web server.
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        axum::serve(listener, router).await
    }

    /// Run the server and return the actual bound address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::result::Result<SocketAddr, std::io::Error> {
        let router = self.build_router();

        let listener = TcpListener::bind(self.addr).await?;
        let local_addr = listener.local_addr()?;

        tracing::info!("Web server listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_config(temp_dir: &TempDir) -> Config {
        let photos = temp_dir.path().join("photos");
        std::fs::create_dir_all(&photos).unwrap();

        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0; // Use random port
        config.server.serve_static = false;
        config.photos.base_dir = photos.to_str().unwrap().to_string();
        config.photos.cache_dir = temp_dir.path().join("cache").to_str().unwrap().to_string();
        config
    }

    #[tokio::test]
    async fn test_web_server_new() {
        let temp_dir = TempDir::new().unwrap();
        let config = create_test_config(&temp_dir);

        let server = WebServer::new(&config).unwrap();
        assert_eq!(server.addr().ip().to_string(), "127.0.0.1");
    }

    #[tokio::test]
    async fn test_web_server_invalid_address() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = create_test_config(&temp_dir);
        config.server.host = "not an address".to_string();

        assert!(WebServer::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_web_server_run() {
        let temp_dir = TempDir::new().unwrap();
        let config = create_test_config(&temp_dir);

        let server = WebServer::new(&config).unwrap();
        let addr = server.run_with_addr().await.unwrap();

        // A random port was assigned and the server accepts connections.
        assert_ne!(addr.port(), 0);
        assert!(tokio::net::TcpStream::connect(addr).await.is_ok());
    }
}
