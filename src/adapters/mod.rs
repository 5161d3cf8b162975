// Adapters layer: concrete implementations for external systems (fixtures, storage, output).

pub mod fixtures;
pub mod output;
pub mod storage;
