// src/application/mod.rs
pub mod model;
pub mod ports;

pub use model::{SluggableModel, install_slug};
