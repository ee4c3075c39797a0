// src/presentation/http/controllers/payments.rs
use super::records::{WRITE_ROLES, changeset};
use crate::domain::{entity::Record, school::Payment};
use crate::presentation::http::{
    error::{HttpError, HttpResult, IntoHttpResult},
    extractors::Authenticated,
    state::HttpState,
};
use axum::{
    Extension, Json,
    body::Bytes,
    extract::Path,
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Map, Value};

pub async fn record_payment(
    Extension(state): Extension<HttpState>,
    Authenticated(ctx): Authenticated,
    Json(body): Json<Map<String, Value>>,
) -> HttpResult<(StatusCode, Json<Record<Payment>>)> {
    ctx.require_role(WRITE_ROLES).into_http()?;
    let data = changeset::<Payment>(&body)?;
    let payment = state
        .services
        .payment_commands
        .record(&ctx, data)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn update_payment(
    Extension(state): Extension<HttpState>,
    Authenticated(ctx): Authenticated,
    Path(id): Path<i64>,
    Json(body): Json<Map<String, Value>>,
) -> HttpResult<Json<Record<Payment>>> {
    ctx.require_role(WRITE_ROLES).into_http()?;
    let data = changeset::<Payment>(&body)?;
    let payment = state
        .services
        .payment_commands
        .update(&ctx, id, data)
        .await
        .into_http()?;
    Ok(Json(payment))
}

#[derive(Debug, Deserialize)]
pub struct CancelPaymentRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

pub async fn cancel_payment(
    Extension(state): Extension<HttpState>,
    Authenticated(ctx): Authenticated,
    Path(id): Path<i64>,
    body: Bytes,
) -> HttpResult<Json<Record<Payment>>> {
    ctx.require_role(WRITE_ROLES).into_http()?;
    // The body is optional; an empty one cancels without a reason.
    let reason = if body.is_empty() {
        None
    } else {
        serde_json::from_slice::<CancelPaymentRequest>(&body)
            .map_err(|err| HttpError::bad_request(format!("invalid request body: {err}")))?
            .reason
    };
    let payment = state
        .services
        .payment_commands
        .cancel(&ctx, id, reason.as_deref())
        .await
        .into_http()?;
    Ok(Json(payment))
}
