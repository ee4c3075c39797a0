use crate::application::dto::{AuditLogDto, RecentActivityDto};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};

#[derive(Debug, serde::Deserialize)]
pub struct RecentActivityParams {
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, serde::Deserialize)]
pub struct TableHistoryParams {
    #[serde(default)]
    pub record_id: Option<i64>,
}

pub async fn recent_activity(
    Extension(state): Extension<HttpState>,
    Authenticated(ctx): Authenticated,
    Query(params): Query<RecentActivityParams>,
) -> HttpResult<Json<Vec<RecentActivityDto>>> {
    let res = state
        .services
        .audit_queries
        .recent_activity(&ctx, params.limit)
        .await
        .into_http()?;
    Ok(Json(res))
}

pub async fn table_history(
    Extension(state): Extension<HttpState>,
    Authenticated(ctx): Authenticated,
    Path(table): Path<String>,
    Query(params): Query<TableHistoryParams>,
) -> HttpResult<Json<Vec<AuditLogDto>>> {
    let res = state
        .services
        .audit_queries
        .table_history(&ctx, &table, params.record_id)
        .await
        .into_http()?;
    Ok(Json(res))
}

pub async fn record_history(
    Extension(state): Extension<HttpState>,
    Authenticated(ctx): Authenticated,
    Path((table, record_id)): Path<(String, i64)>,
) -> HttpResult<Json<Vec<AuditLogDto>>> {
    let res = state
        .services
        .audit_queries
        .record_history(&ctx, &table, record_id)
        .await
        .into_http()?;
    Ok(Json(res))
}
