/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use tasknest_api::{app::AppState, config::Config};
/// use tasknest_shared::mail::SmtpMailer;
/// use sqlx::PgPool;
/// use std::sync::Arc;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let mailer = SmtpMailer::new(config.mail.smtp_config())?;
/// let state = AppState::new(pool, config, Arc::new(mailer));
/// let app = tasknest_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```
use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tasknest_shared::mail::Mailer;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Outbound mail transport
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            db,
            config: Arc::new(config),
            mailer,
        }
    }

    /// Gets the session token signing secret
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// The router is organized as follows:
/// ```text
/// /
/// ├── /health                        # Health check (public)
/// ├── /v1/                           # API v1 (behind x-api-key gate)
/// │   ├── /auth/
/// │   │   ├── POST /register
/// │   │   ├── POST /verify
/// │   │   ├── POST /login
/// │   │   ├── PUT  /updatePassword/:id
/// │   │   └── GET  /verifyToken
/// │   ├── /category/
/// │   │   ├── GET    /get/:user_id   # List a user's categories
/// │   │   ├── POST   /create/:user_id
/// │   │   ├── PUT    /update/:id     # Merge-update category
/// │   │   └── DELETE /delete/:id
/// │   └── /task/
/// │       ├── GET    /get/:user_id   # List a user's tasks (with category)
/// │       ├── POST   /create/:user_id
/// │       ├── PUT    /update/:id     # Merge-update task
/// │       ├── PUT    /toggleStatus/:id
/// │       └── DELETE /delete/:id
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Pre-shared API key gate (all of /v1)
/// 4. Session token checks (inside the handlers that need them)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no gate)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Identity endpoints. updatePassword and verifyToken check the Bearer
    // session token themselves.
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/verify", post(routes::auth::verify))
        .route("/login", post(routes::auth::login))
        .route("/updatePassword/:id", put(routes::auth::update_password))
        .route("/verifyToken", get(routes::auth::verify_token));

    // Category CRUD
    let category_routes = Router::new()
        .route("/get/:user_id", get(routes::category::list_categories))
        .route("/create/:user_id", post(routes::category::create_category))
        .route("/update/:id", put(routes::category::update_category))
        .route(
            "/delete/:id",
            axum::routing::delete(routes::category::delete_category),
        );

    // Task CRUD
    let task_routes = Router::new()
        .route("/get/:user_id", get(routes::task::list_tasks))
        .route("/create/:user_id", post(routes::task::create_task))
        .route("/update/:id", put(routes::task::update_task))
        .route("/toggleStatus/:id", put(routes::task::toggle_status))
        .route(
            "/delete/:id",
            axum::routing::delete(routes::task::delete_task),
        );

    // Build complete v1 API behind the pre-shared key gate
    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/category", category_routes)
        .nest("/task", task_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::gate::require_api_key,
        ));

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::AUTHORIZATION,
                header::CONTENT_TYPE,
                header::HeaderName::from_static(crate::middleware::gate::API_KEY_HEADER),
            ])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    // Combine all routes with middleware stack
    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
