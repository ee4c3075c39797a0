// src/presentation/http/controllers/records.rs
//! CRUD handlers shared by every tenant-owned resource.
use crate::application::{
    error::ApplicationError,
    services::{ApplicationServices, DeleteMode, RecordServices},
};
use crate::domain::{
    entity::{Changeset, Entity, Record},
    query::{Conditions, OrderBy, Page, PageRequest},
    tenant::Role,
};
use crate::presentation::http::{
    error::{HttpError, HttpResult, IntoHttpResult},
    extractors::Authenticated,
    state::HttpState,
};
use axum::{
    Extension, Json,
    extract::{Path, RawQuery},
    http::StatusCode,
};
use serde_json::{Map, Value, json};

pub const WRITE_ROLES: &[Role] = &[Role::Contador];
pub const DELETE_ROLES: &[Role] = &[];

/// Query keys with a fixed meaning; every other key filters on a column.
const RESERVED_PARAMS: &[&str] = &["page", "per_page", "sort", "plantelId"];

#[derive(Debug)]
pub struct ListParams {
    pub page: PageRequest,
    pub order_by: OrderBy,
    pub conditions: Conditions,
}

impl ListParams {
    /// `?page=2&per_page=20&sort=last_name:desc&status=active`
    pub fn parse<E: Entity>(query: Option<&str>) -> HttpResult<Self> {
        let pairs: Vec<(String, String)> = match query {
            Some(query) => serde_urlencoded::from_str(query)
                .map_err(|err| HttpError::bad_request(format!("invalid query string: {err}")))?,
            None => Vec::new(),
        };

        let mut page = None;
        let mut per_page = None;
        let mut order_by = OrderBy::new();
        let mut filters = Map::new();
        for (key, value) in pairs {
            match key.as_str() {
                "page" => page = Some(parse_number(&key, &value)?),
                "per_page" => per_page = Some(parse_number(&key, &value)?),
                "sort" => order_by = OrderBy::parse(&value),
                k if RESERVED_PARAMS.contains(&k) => {}
                _ => push_filter(&mut filters, key, value),
            }
        }

        let defaults = PageRequest::default();
        let conditions = Conditions::from_json::<E>(&filters)
            .map_err(|err| HttpError::from_error(err.into()))?;
        Ok(Self {
            page: PageRequest::new(
                page.unwrap_or(defaults.page()),
                per_page.unwrap_or(defaults.per_page()),
            ),
            order_by,
            conditions,
        })
    }
}

/// A repeated key (`status=a&status=b`) becomes one `IN` condition.
fn push_filter(filters: &mut Map<String, Value>, key: String, value: String) {
    match filters.get_mut(&key) {
        None => {
            filters.insert(key, Value::String(value));
        }
        Some(Value::Object(ops)) => {
            if let Some(Value::Array(values)) = ops.get_mut("IN") {
                values.push(Value::String(value));
            }
        }
        Some(existing) => {
            let first = existing.take();
            *existing = json!({ "IN": [first, value] });
        }
    }
}

fn parse_number(key: &str, value: &str) -> HttpResult<u32> {
    value
        .trim()
        .parse()
        .map_err(|_| HttpError::bad_request(format!("{key} must be a positive integer")))
}

pub(super) fn changeset<E: Entity>(body: &Map<String, Value>) -> HttpResult<Changeset<E>> {
    Changeset::from_input(body).map_err(|err| HttpError::from_error(ApplicationError::from(err)))
}

pub async fn list<E>(
    Extension(state): Extension<HttpState>,
    Authenticated(ctx): Authenticated,
    RawQuery(query): RawQuery,
) -> HttpResult<Json<Page<Record<E>>>>
where
    E: Entity,
    ApplicationServices: RecordServices<E>,
{
    let params = ListParams::parse::<E>(query.as_deref())?;
    let page = RecordServices::<E>::records(state.services.as_ref())
        .paginate(&ctx, params.page, params.conditions, &params.order_by)
        .await
        .into_http()?;
    Ok(Json(page))
}

pub async fn show<E>(
    Extension(state): Extension<HttpState>,
    Authenticated(ctx): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<Record<E>>>
where
    E: Entity,
    ApplicationServices: RecordServices<E>,
{
    let record = RecordServices::<E>::records(state.services.as_ref())
        .get(&ctx, id)
        .await
        .into_http()?;
    Ok(Json(record))
}

pub async fn create<E>(
    Extension(state): Extension<HttpState>,
    Authenticated(ctx): Authenticated,
    Json(body): Json<Map<String, Value>>,
) -> HttpResult<(StatusCode, Json<Record<E>>)>
where
    E: Entity,
    ApplicationServices: RecordServices<E>,
{
    ctx.require_role(WRITE_ROLES).into_http()?;
    let data = changeset::<E>(&body)?;
    let record = RecordServices::<E>::records(state.services.as_ref())
        .create(&ctx, data)
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update<E>(
    Extension(state): Extension<HttpState>,
    Authenticated(ctx): Authenticated,
    Path(id): Path<i64>,
    Json(body): Json<Map<String, Value>>,
) -> HttpResult<Json<Record<E>>>
where
    E: Entity,
    ApplicationServices: RecordServices<E>,
{
    ctx.require_role(WRITE_ROLES).into_http()?;
    let data = changeset::<E>(&body)?;
    let record = RecordServices::<E>::records(state.services.as_ref())
        .update(&ctx, id, data)
        .await
        .into_http()?;
    Ok(Json(record))
}

/// Soft delete: the row is kept with `status = inactive`.
pub async fn remove<E>(
    Extension(state): Extension<HttpState>,
    Authenticated(ctx): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<StatusCode>
where
    E: Entity,
    ApplicationServices: RecordServices<E>,
{
    ctx.require_role(DELETE_ROLES).into_http()?;
    RecordServices::<E>::records(state.services.as_ref())
        .remove(&ctx, id, DeleteMode::Soft)
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}
