//! API Layer
//!
//! HTTP endpoints and request handling for the auth routes.

pub mod handlers;
pub mod magic_link_handlers;
pub mod oauth_handlers;
pub mod routes;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use handlers::AppState;
pub use routes::{create_routes, RouterBuilder};
