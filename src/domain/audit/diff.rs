// src/domain/audit/diff.rs
use crate::domain::entity::{Snapshot, TIMESTAMP_COLUMNS};
use serde_json::Value;

pub const REDACTED: &str = "********";

/// Top-level keys whose values never reach the audit table.
pub const SENSITIVE_FIELDS: &[&str] = &["password", "token", "secret", "api_key"];

#[derive(Debug, Clone, PartialEq)]
pub struct AuditDiff {
    pub old: Snapshot,
    pub new: Snapshot,
}

/// Keys of `new` whose value differs from `old`, bookkeeping timestamps
/// excluded. A key missing from `old` counts as null. `None` when nothing
/// changed.
pub fn diff(old: &Snapshot, new: &Snapshot) -> Option<AuditDiff> {
    let mut changed_old = Snapshot::new();
    let mut changed_new = Snapshot::new();

    for (key, new_value) in new {
        if TIMESTAMP_COLUMNS.contains(&key.as_str()) {
            continue;
        }
        let old_value = old.get(key).unwrap_or(&Value::Null);
        if old_value != new_value {
            changed_old.insert(key.clone(), old_value.clone());
            changed_new.insert(key.clone(), new_value.clone());
        }
    }

    if changed_new.is_empty() {
        None
    } else {
        Some(AuditDiff {
            old: changed_old,
            new: changed_new,
        })
    }
}

/// Mask sensitive top-level keys. Nested structures are not inspected.
pub fn redact(mut values: Snapshot) -> Snapshot {
    for field in SENSITIVE_FIELDS {
        if let Some(value) = values.get_mut(*field) {
            *value = Value::String(REDACTED.to_string());
        }
    }
    values
}
