// tests/audit_query_tests.rs
use campus_core::application::queries::audit::MAX_RECENT_LIMIT;
use campus_core::domain::audit::{AuditAction, NewAuditLog};
use campus_core::domain::tenant::Role;
use chrono::Duration;
use serde_json::json;

mod support;

use support::{
    MemoryAuditRepo, PLANTEL_A, PLANTEL_B, TestApp, admin, contador, ctx, ctx_with_override,
    fixed_now,
};

fn entry(table: &str, record_id: i64, action: AuditAction, minutes: i64, plantel: i64) -> NewAuditLog {
    let (old_values, new_values) = match action {
        AuditAction::Create => (None, Some(json!({"status": "active"}))),
        AuditAction::Update => (Some(json!({"status": "active"})), Some(json!({"status": "inactive"}))),
        AuditAction::Delete => (Some(json!({"status": "inactive"})), None),
    };
    NewAuditLog {
        table_name: table.into(),
        record_id,
        action,
        old_values: old_values.and_then(|v| v.as_object().cloned()),
        new_values: new_values.and_then(|v| v.as_object().cloned()),
        actor_id: Some(2),
        tenant_id: Some(plantel),
        client_ip: None,
        client_agent: None,
        created_at: fixed_now() + Duration::minutes(minutes),
    }
}

fn seeded() -> TestApp {
    let audit = MemoryAuditRepo::new().with_user(2, "Carla Contadora", "carla@example.com");
    audit.seed(entry("students", 1, AuditAction::Update, 10, PLANTEL_A));
    audit.seed(entry("students", 1, AuditAction::Create, 0, PLANTEL_A));
    audit.seed(entry("students", 2, AuditAction::Create, 5, PLANTEL_B));
    audit.seed(entry("payments", 1, AuditAction::Delete, 20, PLANTEL_A));
    TestApp::with_audit(audit)
}

#[tokio::test]
async fn record_history_is_oldest_first_with_changes() {
    let app = seeded();
    let history = app
        .services
        .audit_queries
        .record_history(&admin(), "students", 1)
        .await
        .unwrap();

    let actions: Vec<_> = history.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(actions, ["create", "update"]);
    assert!(history[0].changes.is_empty());
    let change = &history[1].changes["status"];
    assert_eq!(change.old, json!("active"));
    assert_eq!(change.new, json!("inactive"));
}

#[tokio::test]
async fn table_history_is_newest_first_and_filters_by_record() {
    let app = seeded();
    let queries = &app.services.audit_queries;

    let all = queries.table_history(&admin(), "students", None).await.unwrap();
    let ids: Vec<_> = all.iter().map(|e| e.record_id).collect();
    assert_eq!(ids, [1, 2, 1]);

    let one = queries
        .table_history(&admin(), "students", Some(2))
        .await
        .unwrap();
    assert_eq!(one.len(), 1);
    assert_eq!(one[0].plantel_id, Some(PLANTEL_B));
}

#[tokio::test]
async fn admin_override_hides_other_planteles() {
    let app = seeded();
    let narrowed = ctx_with_override(Role::Admin, None, Some(PLANTEL_A));
    let history = app
        .services
        .audit_queries
        .table_history(&narrowed, "students", None)
        .await
        .unwrap();
    assert!(history.iter().all(|e| e.plantel_id == Some(PLANTEL_A)));
    assert_eq!(history.len(), 2);
}

#[tokio::test]
async fn audit_queries_require_admin() {
    let app = seeded();
    let queries = &app.services.audit_queries;

    let err = queries
        .record_history(&contador(PLANTEL_A), "students", 1)
        .await
        .unwrap_err();
    assert!(err.is_forbidden());

    let err = queries
        .recent_activity(&ctx(Role::Consulta, Some(PLANTEL_A)), None)
        .await
        .unwrap_err();
    assert!(err.is_forbidden());
}

#[tokio::test]
async fn table_name_is_validated() {
    let app = seeded();
    let err = app
        .services
        .audit_queries
        .table_history(&admin(), "students; drop table", None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        campus_core::application::error::ApplicationError::Validation(_)
    ));
}

#[tokio::test]
async fn recent_activity_joins_actor_and_respects_limit() {
    let app = seeded();
    let queries = &app.services.audit_queries;

    let recent = queries.recent_activity(&admin(), Some(2)).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].entry.table_name, "payments");
    assert_eq!(recent[0].user_name.as_deref(), Some("Carla Contadora"));
    assert_eq!(recent[0].user_email.as_deref(), Some("carla@example.com"));

    let narrowed = ctx_with_override(Role::Admin, None, Some(PLANTEL_B));
    let recent = queries.recent_activity(&narrowed, None).await.unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].entry.record_id, 2);

    let capped = queries
        .recent_activity(&admin(), Some(MAX_RECENT_LIMIT * 10))
        .await
        .unwrap();
    assert_eq!(capped.len(), 4);
}

#[tokio::test]
async fn dto_serializes_with_api_field_names() {
    let app = seeded();
    let recent = app
        .services
        .audit_queries
        .recent_activity(&admin(), Some(1))
        .await
        .unwrap();
    let json = serde_json::to_value(&recent[0]).unwrap();
    assert_eq!(json["table_name"], "payments");
    assert_eq!(json["action"], "delete");
    assert_eq!(json["user_id"], 2);
    assert_eq!(json["plantel_id"], PLANTEL_A);
    assert_eq!(json["user_name"], "Carla Contadora");
    assert!(json.get("changes").is_none());
}
