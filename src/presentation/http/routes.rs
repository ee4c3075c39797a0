// src/presentation/http/routes.rs
use crate::domain::school::{Payment, Student};
use crate::presentation::http::controllers::{audit, payments, records};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json, Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use serde::Serialize;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

pub fn build_router(state: HttpState, allowed_origins: &[String]) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allow_origin(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/health", get(health))
        .route(
            "/api/v1/students",
            get(records::list::<Student>).post(records::create::<Student>),
        )
        .route(
            "/api/v1/students/{id}",
            get(records::show::<Student>)
                .put(records::update::<Student>)
                .delete(records::remove::<Student>),
        )
        .route(
            "/api/v1/payments",
            get(records::list::<Payment>).post(payments::record_payment),
        )
        .route(
            "/api/v1/payments/{id}",
            get(records::show::<Payment>).put(payments::update_payment),
        )
        .route("/api/v1/payments/{id}/cancel", post(payments::cancel_payment))
        .route("/api/v1/audit", get(audit::recent_activity))
        .route("/api/v1/audit/{table}", get(audit::table_history))
        .route("/api/v1/audit/{table}/{record_id}", get(audit::record_history))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

fn allow_origin(origins: &[String]) -> AllowOrigin {
    if origins.iter().any(|o| o == "*") {
        return AllowOrigin::any();
    }
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();
    AllowOrigin::list(parsed)
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
}

pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".into(),
    })
}
