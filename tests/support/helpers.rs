// tests/support/helpers.rs
use super::mocks::{self, MemoryAuditRepo, MemoryRecordRepository, StaticAuthenticator, TestClock};
use axum::body::{self, Body};
use axum::http::{Method, Request, StatusCode, header::AUTHORIZATION};
use campus_core::application::{
    ClientInfo, RequestContext,
    ports::time::Clock,
    services::ApplicationServices,
};
use campus_core::domain::audit::AuditLogRepository;
use campus_core::domain::school::{Payment, Student};
use campus_core::domain::tenant::Role;
use campus_core::presentation::http::{routes::build_router, state::HttpState};
use serde_json::Value;
use std::sync::Arc;

/// Services wired to in-memory stores, with handles kept for assertions.
pub struct TestApp {
    pub clock: Arc<TestClock>,
    pub students: Arc<MemoryRecordRepository<Student>>,
    pub payments: Arc<MemoryRecordRepository<Payment>>,
    pub audit: Arc<MemoryAuditRepo>,
    pub services: Arc<ApplicationServices>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_audit_repo(Arc::new(MemoryAuditRepo::new()))
    }

    pub fn with_audit(audit: MemoryAuditRepo) -> Self {
        Self::with_audit_repo(Arc::new(audit))
    }

    fn with_audit_repo(audit: Arc<MemoryAuditRepo>) -> Self {
        let clock = Arc::new(TestClock::new());
        let students = Arc::new(MemoryRecordRepository::<Student>::new(clock_port(&clock)));
        let payments = Arc::new(MemoryRecordRepository::<Payment>::new(clock_port(&clock)));
        let audit_port: Arc<dyn AuditLogRepository> = audit.clone();
        let services = Arc::new(ApplicationServices::new(
            students.clone(),
            payments.clone(),
            audit_port,
            Arc::new(StaticAuthenticator),
            clock_port(&clock),
        ));
        Self {
            clock,
            students,
            payments,
            audit,
            services,
        }
    }

    /// Same stores as `new`, but audit writes always fail.
    pub fn with_failing_audit() -> (Self, Arc<ApplicationServices>) {
        let app = Self::new();
        let services = Arc::new(ApplicationServices::new(
            app.students.clone(),
            app.payments.clone(),
            Arc::new(mocks::FailingAuditRepo),
            Arc::new(StaticAuthenticator),
            clock_port(&app.clock),
        ));
        (app, services)
    }

    pub fn router(&self) -> axum::Router {
        let state = HttpState {
            services: Arc::clone(&self.services),
        };
        build_router(state, &[])
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

fn clock_port(clock: &Arc<TestClock>) -> Arc<dyn Clock> {
    clock.clone()
}

pub fn client() -> ClientInfo {
    ClientInfo {
        ip: Some("10.0.0.5".into()),
        user_agent: Some("campus-test".into()),
    }
}

pub fn ctx(role: Role, plantel: Option<i64>) -> RequestContext {
    ctx_with_override(role, plantel, None)
}

pub fn ctx_with_override(
    role: Role,
    plantel: Option<i64>,
    tenant_override: Option<i64>,
) -> RequestContext {
    let id = match role {
        Role::Admin => 1,
        Role::Contador => 2,
        Role::Consulta => 3,
    };
    RequestContext::new(mocks::security::actor(id, role, plantel), tenant_override, client())
}

pub fn admin() -> RequestContext {
    ctx(Role::Admin, None)
}

pub fn contador(plantel: i64) -> RequestContext {
    ctx(Role::Contador, Some(plantel))
}

pub fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn read_json(resp: axum::response::Response) -> Value {
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("valid json body")
}

/// Assert an `{error, message}` body with the expected status and reason.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_error: &str,
) -> Value {
    assert_eq!(resp.status(), expected_status);
    let ct = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    assert!(ct.starts_with("application/json"), "unexpected content-type: {ct}");
    let json = read_json(resp).await;
    assert_eq!(json["error"], expected_error, "unexpected error field: {json}");
    assert!(
        json["message"].as_str().is_some_and(|m| !m.is_empty()),
        "expected non-empty message"
    );
    json
}
