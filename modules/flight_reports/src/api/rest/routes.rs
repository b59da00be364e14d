use axum::{routing::get, Extension, Router};
use std::sync::Arc;

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// Wire the flight and report endpoints onto `router`.
pub fn register_routes(router: Router, service: Arc<Service>) -> Router {
    router
        .route("/api/flights", get(handlers::list_flights))
        .route("/api/flights/{id}", get(handlers::get_flight))
        .route(
            "/api/reports",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .route(
            "/api/reports/{id}",
            get(handlers::get_report).put(handlers::update_report),
        )
        .layer(Extension(service))
}
