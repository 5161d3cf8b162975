// Domain layer: data shapes, view state and ports. Nothing here performs I/O.

pub mod column;
pub mod dataset;
pub mod model;
pub mod navigation;
pub mod ports;
pub mod state;
pub mod user;
