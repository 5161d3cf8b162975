use crate::utils::error::{Result, ScerosError};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ScerosError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ScerosError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ScerosError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ScerosError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ScerosError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Splits a `key=value` CLI filter argument.
pub fn parse_key_value(field_name: &str, raw: &str) -> Result<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(ScerosError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: raw.to_string(),
            reason: "Expected the form key=value".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("data.fixtures_dir", "./fixtures").is_ok());
        assert!(validate_path("data.fixtures_dir", "").is_err());
        assert!(validate_path("data.fixtures_dir", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("data.page_size", 10, 1).is_ok());
        assert!(validate_positive_number("data.page_size", 0, 1).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("thresholds.water", 500.0, 0.001, f64::MAX).is_ok());
        assert!(validate_range("thresholds.water", 0.0, 0.001, f64::MAX).is_err());
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("filter", "role=Admin").unwrap(),
            ("role".to_string(), "Admin".to_string())
        );
        assert_eq!(
            parse_key_value("filter", "status=").unwrap(),
            ("status".to_string(), String::new())
        );
        assert!(parse_key_value("filter", "role").is_err());
        assert!(parse_key_value("filter", "=Admin").is_err());
    }
}
