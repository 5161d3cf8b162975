use crate::core::metrics::Thresholds;
use crate::utils::error::{Result, ScerosError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of a `sceros.toml` file. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub data: Option<DataConfig>,
    pub session: Option<SessionConfig>,
    pub auth: Option<AuthConfig>,
    pub thresholds: Option<Thresholds>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    pub fixtures_dir: Option<String>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    pub store_dir: Option<String>,
    pub key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    pub mock_password: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ScerosError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ScerosError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SCEROS_PASSWORD})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ScerosError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(data) = &self.data {
            if let Some(dir) = &data.fixtures_dir {
                validate_path("data.fixtures_dir", dir)?;
            }
            if let Some(page_size) = data.page_size {
                validate_positive_number("data.page_size", page_size, 1)?;
            }
        }

        if let Some(session) = &self.session {
            if let Some(dir) = &session.store_dir {
                validate_path("session.store_dir", dir)?;
            }
            if let Some(key) = &session.key {
                validate_non_empty_string("session.key", key)?;
            }
        }

        if let Some(auth) = &self.auth {
            if let Some(password) = &auth.mock_password {
                validate_non_empty_string("auth.mock_password", password)?;
            }
        }

        if let Some(thresholds) = &self.thresholds {
            validate_range("thresholds.electricity", thresholds.electricity, f64::MIN_POSITIVE, f64::MAX)?;
            validate_range("thresholds.water", thresholds.water, f64::MIN_POSITIVE, f64::MAX)?;
            validate_range("thresholds.hvac", thresholds.hvac, f64::MIN_POSITIVE, f64::MAX)?;
        }

        Ok(())
    }
}
