//! Notes Auth Development Server
//!
//! Serves the OAuth callback and magic-link routes with every endpoint
//! enabled, configured from the environment (and `.env` when present).

use std::sync::Arc;

use axum::http::HeaderValue;
use dotenv::dotenv;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use notes_auth::{
    api::{AppState, RouterBuilder},
    config::AppConfig,
    database,
    service::{SessionService, SupabaseAuthService, UserService},
};

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::new()
            .allow_origin(Any) // Permissive CORS for development
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("⚠️  Ignoring invalid CORS origin {}", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file if present
    dotenv().ok();

    env_logger::init();

    log::info!("🚀 Starting Notes Auth v{}", notes_auth::VERSION);

    let config = AppConfig::from_env()?;
    config.validate()?;

    log::info!("✅ Configuration loaded and validated");

    let database_pool = database::create_pool(&config.database).await?;

    log::info!("🔄 Running database migrations...");
    database::run_migrations(&database_pool).await?;
    log::info!("✅ Database migrations completed");

    let user_service = Arc::new(UserService::new(database_pool));
    let auth_service = Arc::new(SupabaseAuthService::new(&config.auth)?);
    let session_service = Arc::new(SessionService::new(&config.session)?);

    log::info!("✅ Services initialized");
    log::info!("   - Auth provider: {}", config.auth.url);
    log::info!(
        "   - Session cookie: {} (secure: {})",
        config.session.cookie_name,
        config.session.secure
    );

    let app_state = AppState::new(user_service, auth_service, session_service);

    let app = RouterBuilder::with_all_routes()
        .build()
        .with_state(app_state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.server.cors_origins))
                .into_inner(),
        );

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);

    log::info!("📋 Endpoints:");
    log::info!("     GET  /health - Health check");
    log::info!("     GET  /oauth/callback - Callback page guard");
    log::info!("     POST /oauth/callback - Complete OAuth / magic-link sign-in");
    log::info!("     POST /send-magic-link - Email a sign-in link");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    log::info!("🌐 Listening on {}", bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
