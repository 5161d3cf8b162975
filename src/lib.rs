pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{fixtures::FixtureSet, storage::FileStore, storage::MemoryStore};
pub use crate::config::Settings;
pub use crate::core::{
    dashboard::Dashboard,
    session::{AuthSession, MockPasswordVerifier},
    view::{clamp_page, compute_view, DataView, ViewResult},
};
pub use crate::domain::{
    column::ColumnSpec,
    model::Record,
    state::{FilterState, SortDirection, SortState, ViewState},
    user::{Role, User},
};
pub use crate::utils::error::{Result, ScerosError};
