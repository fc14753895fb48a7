pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::BatchConfig;
pub use crate::core::{engine::ExpansionEngine, pipeline::BatchPipeline, symbols::transform};
pub use utils::error::{ExpandError, Result};
