use crate::handlers;
use crate::middleware::{auth_middleware, request_log_middleware};
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use shared::config::Config;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// The router wrapped so that trailing slashes are trimmed before routing
pub type App = NormalizePath<Router>;

/// The service `main` serves: [`build_router`] behind path normalization.
///
/// Normalization has to wrap the whole router; as a `Router::layer` it would
/// only run after a route had already been chosen.
pub fn build_app(state: AppState, config: &Config) -> App {
    NormalizePath::trim_trailing_slash(build_router(state, config))
}

/// Build and configure the application router
pub fn build_router(state: AppState, config: &Config) -> Router {
    // Routes that need a valid bearer token
    let protected = Router::new()
        .route("/api/tasks", get(handlers::list_tasks).post(handlers::create_task))
        .route(
            "/api/tasks/{id}",
            patch(handlers::update_task).delete(handlers::delete_task),
        )
        .route("/api/view-db", get(handlers::view_database))
        .route("/api/auth/logout", post(handlers::logout))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let api = Router::new()
        .route("/api/auth/signup", post(handlers::signup))
        .route("/api/auth/login", post(handlers::login))
        .merge(protected)
        .layer(from_fn_with_state(state.clone(), request_log_middleware));

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        .merge(api)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
