use crate::domain::column::parse_datetime;
use crate::domain::model::value_text;
use serde_json::Value;
use std::cmp::Ordering;

/// Natural ordering of two field values.
///
/// Missing values come first. Numbers compare numerically. Strings that read
/// as dates sort before all other strings and compare chronologically among
/// themselves; the rest compare lexicographically. Values of different kinds
/// are ordered by kind.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_present(a, b),
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => match (parse_datetime(x), parse_datetime(y)) {
            (Some(dx), Some(dy)) => dx.cmp(&dy),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => x.cmp(y),
        },
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            value_text(a).cmp(&value_text(b))
        }
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Filter equality. Select widgets hand over text, so the expected value is
/// read in the field's own type: numbers numerically, booleans as
/// `true`/`false`, everything else as exact text.
pub fn value_equals(value: Option<&Value>, expected: &str) -> bool {
    match value {
        None => false,
        Some(Value::String(s)) => s == expected,
        Some(Value::Number(n)) => match (n.as_f64(), expected.trim().parse::<f64>()) {
            (Some(actual), Ok(wanted)) => actual == wanted,
            _ => false,
        },
        Some(Value::Bool(b)) => expected.parse::<bool>().map(|e| e == *b).unwrap_or(false),
        Some(other) => value_text(other).is_some_and(|text| text == expected),
    }
}
