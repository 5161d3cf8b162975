use crate::core::metrics::UsageSeries;
use crate::domain::dataset::Dataset;
use crate::domain::model::Record;
use crate::domain::user::User;
use crate::utils::error::{Result, ScerosError};
use serde_json::Value;
use std::fs;
use std::path::Path;

pub const USAGE_FILE: &str = "usage.json";

/// All static data the dashboards draw from.
#[derive(Debug, Clone, Default)]
pub struct FixtureSet {
    pub areas: Vec<Record>,
    pub alerts: Vec<Record>,
    pub users: Vec<Record>,
    pub recommendations: Vec<Record>,
    pub usage: Vec<UsageSeries>,
}

impl FixtureSet {
    /// Loads every fixture file from `dir`. A missing `usage.json` yields no
    /// history; every other file is required.
    pub fn load(dir: &Path) -> Result<Self> {
        tracing::debug!("Loading fixtures from {}", dir.display());

        let usage_path = dir.join(USAGE_FILE);
        let usage = if usage_path.exists() {
            parse_usage(&fs::read_to_string(&usage_path)?)?
        } else {
            tracing::warn!("{} not found, usage history disabled", usage_path.display());
            Vec::new()
        };

        let fixtures = Self {
            areas: load_records(dir, Dataset::Areas)?,
            alerts: load_records(dir, Dataset::Alerts)?,
            users: load_records(dir, Dataset::Users)?,
            recommendations: load_records(dir, Dataset::Recommendations)?,
            usage,
        };

        tracing::info!(
            "Loaded {} areas, {} alerts, {} users, {} recommendations",
            fixtures.areas.len(),
            fixtures.alerts.len(),
            fixtures.users.len(),
            fixtures.recommendations.len()
        );
        Ok(fixtures)
    }

    pub fn records(&self, dataset: Dataset) -> &[Record] {
        match dataset {
            Dataset::Areas => &self.areas,
            Dataset::Alerts => &self.alerts,
            Dataset::Users => &self.users,
            Dataset::Recommendations => &self.recommendations,
        }
    }

    /// Typed view of the users fixture, for the login lookup.
    pub fn user_accounts(&self) -> Result<Vec<User>> {
        self.users
            .iter()
            .map(|record| {
                serde_json::to_value(record)
                    .and_then(serde_json::from_value)
                    .map_err(|e| ScerosError::FixtureError {
                        name: Dataset::Users.file_name(),
                        message: format!("user {:?}: {}", record.text("email"), e),
                    })
            })
            .collect()
    }
}

fn load_records(dir: &Path, dataset: Dataset) -> Result<Vec<Record>> {
    let path = dir.join(dataset.file_name());
    let content = fs::read_to_string(&path).map_err(|e| ScerosError::FixtureError {
        name: dataset.file_name(),
        message: format!("{}: {}", path.display(), e),
    })?;
    parse_records(&dataset.file_name(), &content)
}

/// Parses a JSON array of objects. Non-object entries are an error.
pub fn parse_records(name: &str, content: &str) -> Result<Vec<Record>> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(items) = value else {
        return Err(ScerosError::FixtureError {
            name: name.to_string(),
            message: "expected a JSON array".to_string(),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            Record::from_value(item).ok_or_else(|| ScerosError::FixtureError {
                name: name.to_string(),
                message: format!("entry {} is not an object", index),
            })
        })
        .collect()
}

pub fn parse_usage(content: &str) -> Result<Vec<UsageSeries>> {
    Ok(serde_json::from_str(content)?)
}
