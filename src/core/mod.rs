pub mod actions;
pub mod dashboard;
pub mod metrics;
pub mod ordering;
pub mod session;
pub mod view;

pub use crate::domain::model::Record;
pub use crate::domain::ports::{ConfigProvider, CredentialVerifier, KeyValueStore};
pub use crate::utils::error::Result;
