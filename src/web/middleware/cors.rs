//! CORS middleware configuration.

use axum::http::header::{ACCEPT, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

/// Create a CORS layer from configuration.
///
/// With no configured origins (dev mode) any origin is allowed; with
/// configured origins only those are allowed. Unparseable origins are
/// dropped, and if none survive the layer falls back to dev mode.
pub fn create_cors_layer(origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::OPTIONS];

    let parsed_origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();

    if parsed_origins.is_empty() {
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers(Any)
            .allow_origin(Any)
    } else {
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([CONTENT_TYPE, ACCEPT])
            .allow_origin(parsed_origins)
    }
}
