use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// One row of fixture data: an area, user, alert or recommendation.
///
/// Fields are kept as raw JSON values. A `null` field is treated exactly like
/// an absent one by every accessor here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: HashMap<String, Value>,
}

/// Identifier as it appears in fixtures, either numeric or textual.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(u64),
    Text(String),
}

/// Row identity used by presentation layers for keyed rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordKey {
    Id(EntityId),
    Position(usize),
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            data: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Wraps a JSON object. Anything else is rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(obj) => Some(Self {
                data: obj.into_iter().collect(),
            }),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key).filter(|v| !v.is_null())
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.data.insert(key.into(), value);
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.get(key).and_then(value_text)
    }

    pub fn id(&self) -> Option<EntityId> {
        self.get("id").and_then(EntityId::from_value)
    }

    /// `id` when present, otherwise the row's position in its collection.
    pub fn key(&self, position: usize) -> RecordKey {
        self.id()
            .map(RecordKey::Id)
            .unwrap_or(RecordKey::Position(position))
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.data.values().filter(|v| !v.is_null())
    }
}

impl EntityId {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().map(EntityId::Number),
            Value::String(s) => Some(EntityId::Text(s.clone())),
            _ => None,
        }
    }

    /// Reads an id typed by a person: digits become a numeric id.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        raw.parse()
            .map(EntityId::Number)
            .unwrap_or_else(|_| EntityId::Text(raw.to_string()))
    }

    /// Strict match: a numeric id never equals its string spelling.
    pub fn matches(&self, value: &Value) -> bool {
        match (self, value) {
            (EntityId::Number(id), Value::Number(n)) => n.as_u64() == Some(*id),
            (EntityId::Text(id), Value::String(s)) => id == s,
            _ => false,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => write!(f, "{}", n),
            EntityId::Text(s) => f.write_str(s),
        }
    }
}

/// String form of a field value, as used for searching and plain output.
/// Arrays join their elements with commas; `null` has no text.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| value_text(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}
