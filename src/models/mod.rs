//! Data Models Module
//!
//! Data structures used throughout the auth routes: the persisted user row,
//! validated form payloads and the session carried in the cookie.

pub mod requests;
pub mod session;
pub mod user;

// Re-export commonly used types
pub use requests::*;
pub use session::*;
pub use user::*;
