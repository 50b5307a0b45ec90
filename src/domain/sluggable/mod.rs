// src/domain/sluggable/mod.rs
pub mod config;
pub mod representation;
pub mod resolver;
pub mod services;

pub use config::{Scope, SlugConfig, SlugConfigBuilder, SlugOptions, SlugSource};
pub use representation::to_param;
pub use resolver::{IdentifierResolver, LookupTarget};
pub use services::SlugGenerator;
