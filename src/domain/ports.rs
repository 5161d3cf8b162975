use crate::core::metrics::Thresholds;
use crate::domain::user::User;
use crate::utils::error::Result;
use std::path::Path;

/// Local key-value storage holding the session object.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Password check for a user found by email.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, user: &User, password: &str) -> bool;
}

pub trait ConfigProvider: Send + Sync {
    fn fixtures_dir(&self) -> &Path;
    fn page_size(&self) -> usize;
    fn session_dir(&self) -> &Path;
    fn session_key(&self) -> &str;
    fn mock_password(&self) -> &str;
    fn thresholds(&self) -> Thresholds;
}
