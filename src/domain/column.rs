use crate::domain::model::value_text;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// Describes one field of a dataset for display, sorting and filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: String,
    pub label: String,
    #[serde(default = "default_true")]
    pub sortable: bool,
    #[serde(default = "default_true")]
    pub filterable: bool,
    #[serde(default)]
    pub filter_options: Option<Vec<FilterOption>>,
    #[serde(default)]
    pub render: Option<Renderer>,
}

/// Display transform for a cell. The view pipeline never looks at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Renderer {
    /// Status-like category shown as a badge, e.g. `[Active]`.
    Badge,
    Date,
    DateTime,
    Currency,
    Percentage,
    /// Length of an array field followed by a unit, e.g. `3 areas`.
    Count { unit: String },
}

impl ColumnSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: true,
            filterable: true,
            filter_options: None,
            render: None,
        }
    }

    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    pub fn not_filterable(mut self) -> Self {
        self.filterable = false;
        self
    }

    pub fn with_filter_options<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter_options = Some(
            values
                .into_iter()
                .map(|v| {
                    let value = v.into();
                    FilterOption {
                        label: value.clone(),
                        value,
                    }
                })
                .collect(),
        );
        self
    }

    pub fn with_renderer(mut self, renderer: Renderer) -> Self {
        self.render = Some(renderer);
        self
    }

    /// Whether `value` is one of the enumerated filter options. Columns
    /// without options accept any value.
    pub fn allows_filter_value(&self, value: &str) -> bool {
        match &self.filter_options {
            Some(options) => options.iter().any(|o| o.value == value),
            None => true,
        }
    }

    /// Cell text for `value`, applying the renderer if one is set.
    pub fn display(&self, value: Option<&Value>) -> String {
        match (&self.render, value) {
            (_, None) => String::new(),
            (Some(renderer), Some(v)) => renderer.render(v),
            (None, Some(v)) => value_text(v).unwrap_or_default(),
        }
    }
}

pub fn find_column<'a>(columns: &'a [ColumnSpec], key: &str) -> Option<&'a ColumnSpec> {
    columns.iter().find(|c| c.key == key)
}

impl Renderer {
    pub fn render(&self, value: &Value) -> String {
        let raw = value_text(value).unwrap_or_default();
        match self {
            Renderer::Badge => format!("[{}]", raw),
            Renderer::Date => parse_datetime(&raw)
                .map(|dt| dt.format("%Y-%m-%d").to_string())
                .unwrap_or(raw),
            Renderer::DateTime => parse_datetime(&raw)
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or(raw),
            Renderer::Currency => match as_number(value) {
                Some(n) => format!("${:.2}", n),
                None => raw,
            },
            Renderer::Percentage => match as_number(value) {
                Some(n) => format!("{:.1}%", n),
                None => raw,
            },
            Renderer::Count { unit } => {
                let count = value.as_array().map(Vec::len).unwrap_or(0);
                format!("{} {}", count, unit)
            }
        }
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS` (with or
/// without fractional seconds or a space separator), and plain dates.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_column_defaults() {
        let column: ColumnSpec =
            serde_json::from_value(json!({"key": "name", "label": "Name"})).unwrap();
        assert!(column.sortable);
        assert!(column.filterable);
        assert!(column.filter_options.is_none());
        assert!(column.render.is_none());
    }

    #[test]
    fn test_renderer_from_config() {
        let column: ColumnSpec = serde_json::from_value(json!({
            "key": "assignedAreas",
            "label": "Areas",
            "sortable": false,
            "render": {"kind": "count", "unit": "areas"}
        }))
        .unwrap();
        assert!(!column.sortable);
        assert_eq!(column.display(Some(&json!([1, 2]))), "2 areas");
    }

    #[test]
    fn test_render_values() {
        assert_eq!(Renderer::Currency.render(&json!(12.3)), "$12.30");
        assert_eq!(Renderer::Currency.render(&json!("4")), "$4.00");
        assert_eq!(Renderer::Percentage.render(&json!(87.34)), "87.3%");
        assert_eq!(Renderer::Badge.render(&json!("Active")), "[Active]");
        assert_eq!(
            Renderer::DateTime.render(&json!("2024-03-20T14:45:00Z")),
            "2024-03-20 14:45"
        );
        assert_eq!(Renderer::Date.render(&json!("2024-03-20T14:45:00Z")), "2024-03-20");
        assert_eq!(Renderer::Date.render(&json!("soon")), "soon");
    }

    #[test]
    fn test_display_missing_value_is_blank() {
        let column = ColumnSpec::new("value", "Value").with_renderer(Renderer::Currency);
        assert_eq!(column.display(None), "");
    }

    #[test]
    fn test_filter_options() {
        let column = ColumnSpec::new("role", "Role").with_filter_options(["Admin", "Student"]);
        assert!(column.allows_filter_value("Admin"));
        assert!(!column.allows_filter_value("Janitor"));
        assert!(ColumnSpec::new("name", "Name").allows_filter_value("anything"));
    }

    #[test]
    fn test_parse_datetime_formats() {
        assert!(parse_datetime("2024-01-15T10:30:00Z").is_some());
        assert!(parse_datetime("2024-01-15T10:30:00.250").is_some());
        assert!(parse_datetime("2024-01-15 10:30:00").is_some());
        assert!(parse_datetime("2024-01-15").is_some());
        assert!(parse_datetime("Library").is_none());
    }
}
