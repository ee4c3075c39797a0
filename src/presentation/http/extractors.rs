// src/presentation/http/extractors.rs
use crate::{
    application::{ClientInfo, RequestContext, error::ApplicationError},
    presentation::http::state::HttpState,
};
use axum::{
    Extension,
    extract::FromRequestParts,
    http::{HeaderMap, header::USER_AGENT, request::Parts},
};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use serde::Deserialize;

use super::error::HttpError;

/// Authenticated caller with its tenant scope resolved.
#[derive(Debug, Clone)]
pub struct Authenticated(pub RequestContext);

#[derive(Debug, Default, Deserialize)]
struct TenantOverride {
    #[serde(rename = "plantelId")]
    plantel_id: Option<String>,
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(app_state) = Extension::<HttpState>::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                HttpError::from_error(ApplicationError::Infrastructure(
                    "application state missing".into(),
                ))
            })?;

        let header = parts
            .headers
            .typed_get::<Authorization<Bearer>>()
            .ok_or_else(|| {
                HttpError::from_error(ApplicationError::Unauthorized(
                    "missing Authorization header".into(),
                ))
            })?;

        let authenticator = app_state.services.authenticator();
        let actor = authenticator
            .authenticate(header.token())
            .await
            .map_err(HttpError::from_error)?;

        let tenant_override = tenant_override(parts.uri.query())?;
        let client = client_info(&parts.headers);
        Ok(Self(RequestContext::new(actor, tenant_override, client)))
    }
}

/// `?plantelId=` as sent by the front end. Empty means no override.
fn tenant_override(query: Option<&str>) -> Result<Option<i64>, HttpError> {
    let Some(query) = query else {
        return Ok(None);
    };
    let parsed: TenantOverride = serde_urlencoded::from_str(query)
        .map_err(|err| HttpError::bad_request(format!("invalid query string: {err}")))?;
    match parsed.plantel_id.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<i64>()
            .map(Some)
            .map_err(|_| HttpError::bad_request("plantelId must be an integer")),
    }
}

fn client_info(headers: &HeaderMap) -> ClientInfo {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| headers.get("x-real-ip").and_then(|v| v.to_str().ok()))
        .map(|s| s.to_string());
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    ClientInfo { ip, user_agent }
}
