pub mod engine;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod symbols;

pub use crate::domain::model::{ExpandedQuery, ExpansionResult, OutputFormat, Query};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
