//! Service Layer
//!
//! Collaborators behind the auth routes: the user store, the hosted auth
//! provider and the session cookie.

pub mod auth_provider;
pub mod session;
pub mod user;

// Re-export services
pub use auth_provider::{AuthProvider, AuthProviderError, AuthProviderResult, SupabaseAuthService};
pub use session::SessionService;
pub use user::{UserService, UserServiceError, UserServiceResult, UserStore};
