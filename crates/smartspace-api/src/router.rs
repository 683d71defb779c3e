//! Route definitions for the Smartspace HTTP API.
//!
//! Domain routes live under `/smartspace`, the health check under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let smartspace_routes = Router::new()
        .merge(action_routes())
        .merge(admin_routes())
        .merge(manager_routes())
        .merge(directory_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/smartspace", smartspace_routes)
        .route("/api/health", get(handlers::health::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Player-facing action endpoints
fn action_routes() -> Router<AppState> {
    Router::new()
        .route("/actions", post(handlers::action::invoke))
        .route("/actions/new", post(handlers::action::create))
        .route("/actions/latest", get(handlers::action::latest))
        .route("/actions/by-type", get(handlers::action::by_type))
        .route("/actions/session", get(handlers::action::session))
        .route("/actions/window", get(handlers::action::window))
        .route(
            "/actions/{smartspace}/{id}",
            delete(handlers::action::delete),
        )
}

/// Admin import and listing
fn admin_routes() -> Router<AppState> {
    Router::new().route(
        "/admin/actions/{admin_smartspace}/{admin_email}",
        post(handlers::admin::import_actions).get(handlers::admin::list_actions),
    )
}

/// Manager-scoped listings
fn manager_routes() -> Router<AppState> {
    Router::new().route(
        "/manager/actions/{manager_smartspace}/{manager_email}",
        get(handlers::manager::list_actions),
    )
}

/// Users, elements, and plugins
fn directory_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(handlers::user::create_user))
        .route("/users/{smartspace}/{email}", get(handlers::user::get_user))
        .route("/elements", post(handlers::element::create_element))
        .route(
            "/elements/{smartspace}/{id}",
            get(handlers::element::get_element),
        )
        .route("/plugins", get(handlers::plugin::list_plugins))
}
