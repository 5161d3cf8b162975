use crate::domain::model::{EntityId, Record};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

/// Marks the alert `id` as resolved at `at`. Returns `None` when no alert
/// has that id.
pub fn resolve_alert(alerts: &[Record], id: &EntityId, at: DateTime<Utc>) -> Option<Vec<Record>> {
    let resolved_at = at.to_rfc3339_opts(SecondsFormat::Millis, true);
    update_where(alerts, id, |alert| {
        alert.insert("status", Value::from("Resolved"));
        alert.insert("resolvedAt", Value::from(resolved_at.clone()));
    })
}

/// Flips the user `id` between `Active` and `Inactive`. Any status other
/// than `Active`, including none, becomes `Active`.
pub fn toggle_user_status(users: &[Record], id: &EntityId) -> Option<Vec<Record>> {
    update_where(users, id, |user| {
        let next = if user.str("status") == Some("Active") {
            "Inactive"
        } else {
            "Active"
        };
        user.insert("status", Value::from(next));
    })
}

pub fn delete_user(users: &[Record], id: &EntityId) -> Option<Vec<Record>> {
    if !users.iter().any(|u| has_id(u, id)) {
        return None;
    }
    Some(users.iter().filter(|u| !has_id(u, id)).cloned().collect())
}

fn has_id(record: &Record, id: &EntityId) -> bool {
    record.get("id").is_some_and(|value| id.matches(value))
}

fn update_where<F>(records: &[Record], id: &EntityId, mut update: F) -> Option<Vec<Record>>
where
    F: FnMut(&mut Record),
{
    let mut found = false;
    let updated: Vec<Record> = records
        .iter()
        .map(|record| {
            let mut record = record.clone();
            if has_id(&record, id) {
                update(&mut record);
                found = true;
            }
            record
        })
        .collect();
    found.then_some(updated)
}
