#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::metrics::Thresholds;
use crate::core::session::{MOCK_PASSWORD, SESSION_KEY};
use crate::domain::ports::ConfigProvider;
use crate::domain::state::DEFAULT_PAGE_SIZE;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, Validate,
};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

/// Effective settings: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub fixtures_dir: PathBuf,
    pub page_size: usize,
    pub session_dir: PathBuf,
    pub session_key: String,
    pub mock_password: String,
    pub thresholds: Thresholds,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fixtures_dir: PathBuf::from("./fixtures"),
            page_size: DEFAULT_PAGE_SIZE,
            session_dir: PathBuf::from("./.sceros"),
            session_key: SESSION_KEY.to_string(),
            mock_password: MOCK_PASSWORD.to_string(),
            thresholds: Thresholds::default(),
        }
    }
}

impl Settings {
    /// Overlays whatever the file sets.
    pub fn merge_file(mut self, file: &TomlConfig) -> Result<Self> {
        file.validate()?;

        if let Some(data) = &file.data {
            if let Some(dir) = &data.fixtures_dir {
                self.fixtures_dir = PathBuf::from(dir);
            }
            if let Some(page_size) = data.page_size {
                self.page_size = page_size;
            }
        }
        if let Some(session) = &file.session {
            if let Some(dir) = &session.store_dir {
                self.session_dir = PathBuf::from(dir);
            }
            if let Some(key) = &session.key {
                self.session_key = key.clone();
            }
        }
        if let Some(password) = file.auth.as_ref().and_then(|a| a.mock_password.as_ref()) {
            self.mock_password = password.clone();
        }
        if let Some(thresholds) = file.thresholds {
            self.thresholds = thresholds;
        }
        Ok(self)
    }

    /// 依序套用預設值、設定檔與命令列參數
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig, page_size: Option<usize>) -> Result<Self> {
        let mut settings = Settings::default();

        if let Some(path) = &cli.config {
            tracing::debug!("Reading configuration from {}", path.display());
            settings = settings.merge_file(&TomlConfig::from_file(path)?)?;
        }
        if let Some(dir) = &cli.fixtures {
            settings.fixtures_dir = dir.clone();
        }
        if let Some(dir) = &cli.session_dir {
            settings.session_dir = dir.clone();
        }
        if let Some(page_size) = page_size {
            settings.page_size = page_size;
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("data.fixtures_dir", &self.fixtures_dir.to_string_lossy())?;
        validate_path("session.store_dir", &self.session_dir.to_string_lossy())?;
        validate_positive_number("data.page_size", self.page_size, 1)?;
        validate_non_empty_string("session.key", &self.session_key)?;
        validate_non_empty_string("auth.mock_password", &self.mock_password)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn fixtures_dir(&self) -> &Path {
        &self.fixtures_dir
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    fn session_key(&self) -> &str {
        &self.session_key
    }

    fn mock_password(&self) -> &str {
        &self.mock_password
    }

    fn thresholds(&self) -> Thresholds {
        self.thresholds
    }
}
