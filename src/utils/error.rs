use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScerosError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Fixture '{name}' could not be loaded: {message}")]
    FixtureError { name: String, message: String },

    #[error("Unknown dataset: {name}")]
    UnknownDataset { name: String },

    #[error("No {dataset} record with id {id}")]
    RecordNotFound { dataset: String, id: String },

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("Role '{role}' may not view {resource}")]
    AccessDenied { role: String, resource: String },
}

impl ScerosError {
    /// Message shown to the person at the terminal.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ScerosError::IoError(e) => format!("File access failed: {}", e),
            ScerosError::SerializationError(e) => format!("Malformed JSON data: {}", e),
            ScerosError::CsvError(e) => format!("Could not write CSV output: {}", e),
            ScerosError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            ScerosError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            ScerosError::FixtureError { name, message } => {
                format!("Fixture '{}' is unusable: {}", name, message)
            }
            ScerosError::UnknownDataset { name } => format!(
                "Unknown dataset '{}'. Available: areas, alerts, users, recommendations",
                name
            ),
            ScerosError::RecordNotFound { dataset, id } => {
                format!("There is no entry {} in {}", id, dataset)
            }
            ScerosError::InvalidCredentials => "Invalid credentials".to_string(),
            ScerosError::NotAuthenticated => {
                "You are not logged in. Run `sceros login` first".to_string()
            }
            ScerosError::AccessDenied { role, resource } => {
                format!("A {} account cannot view {}", role, resource)
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            ScerosError::InvalidCredentials
            | ScerosError::NotAuthenticated
            | ScerosError::AccessDenied { .. } => 2,
            ScerosError::ConfigValidationError { .. }
            | ScerosError::InvalidConfigValueError { .. }
            | ScerosError::UnknownDataset { .. } => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScerosError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message_is_generic() {
        let err = ScerosError::InvalidCredentials;
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.user_friendly_message(), "Invalid credentials");
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_config_errors_exit_with_config_code() {
        let err = ScerosError::InvalidConfigValueError {
            field: "data.fixtures_dir".to_string(),
            value: String::new(),
            reason: "Path cannot be empty".to_string(),
        };
        assert_eq!(err.exit_code(), 3);
        assert!(err.user_friendly_message().contains("data.fixtures_dir"));
    }
}
