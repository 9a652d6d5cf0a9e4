use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::SqlitePool;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::config::Settings;

pub mod error;
pub mod middleware;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub settings: Settings,
}

/// Assemble the application router: public participant routes plus the admin
/// routes behind the bearer-token middleware layer.
pub fn router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/api/admin/activities",
            post(routes::admin::create_activity_handler).get(routes::admin::list_activities_handler),
        )
        .route(
            "/api/admin/activities/{activity_code}",
            put(routes::admin::update_activity_handler)
                .delete(routes::admin::delete_activity_handler),
        )
        .route(
            "/api/admin/activities/{activity_code}/logs",
            get(routes::admin::activity_logs_handler),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_admin,
        ));

    Router::new()
        .route("/api/admin/login", post(routes::admin::login_handler))
        .route(
            "/api/participant/activity/{activity_code}",
            get(routes::participant::activity_details_handler),
        )
        .route(
            "/api/participant/checkin",
            post(routes::participant::checkin_handler),
        )
        .route(
            "/api/participant/checkout",
            post(routes::participant::checkout_handler),
        )
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
