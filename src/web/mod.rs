//! Web API module for PICCULL.
//!
//! REST API for browsing folders, serving thumbnails, building comparison
//! batches and saving selections, plus the Swagger UI and the static front
//! end.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
