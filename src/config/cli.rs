use crate::core::{ConfigProvider, Query};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "query-symbols")]
#[command(about = "Expand shorthand symbols in query strings")]
pub struct CliConfig {
    /// Queries to expand. Read from stdin when neither queries nor --input are given
    pub queries: Vec<Query>,

    /// Expand every query in this file (.json array or one query per line)
    #[arg(short, long)]
    pub input: Option<String>,

    #[arg(short, long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "txt")]
    pub formats: Vec<String>,

    #[arg(long, default_value = "expanded")]
    pub basename: String,

    #[arg(long, help = "List the supported shorthand symbols and exit")]
    pub list_symbols: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> Option<&str> {
        self.input.as_deref()
    }

    fn inline_queries(&self) -> &[Query] {
        &self.queries
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn output_basename(&self) -> &str {
        &self.basename
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(input) = &self.input {
            validation::validate_path("input", input)?;
        }
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats)?;
        validation::validate_basename("basename", &self.basename)?;
        Ok(())
    }
}
