use crate::core::{ConfigProvider, Query};
use crate::utils::error::{ExpandError, Result};
use crate::utils::validation::{self, Validate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// `${VAR_NAME}` references inside the raw TOML text.
static ENV_VAR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([^}]+)\}").expect("Valid regex pattern"));

const DEFAULT_BASENAME: &str = "expanded";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub batch: BatchInfo,
    #[serde(default)]
    pub input: InputConfig,
    pub output: OutputConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
    #[serde(default)]
    pub queries: Vec<Query>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
    pub basename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl BatchConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ExpandError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ExpandError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})，未定義的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_REGEX
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("batch.name", &self.batch.name)?;

        if let Some(path) = &self.input.path {
            validation::validate_path("input.path", path)?;
        }

        for (index, query) in self.input.queries.iter().enumerate() {
            if let Some(name) = &query.name {
                validation::validate_non_empty_string(&format!("input.queries[{}].name", index), name)?;
            }
        }

        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_output_formats("output.formats", &self.output.formats)?;

        if let Some(basename) = &self.output.basename {
            validation::validate_basename("output.basename", basename)?;
        }

        Ok(())
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for BatchConfig {
    fn input_path(&self) -> Option<&str> {
        self.input.path.as_deref()
    }

    fn inline_queries(&self) -> &[Query] {
        &self.input.queries
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn output_basename(&self) -> &str {
        self.output.basename.as_deref().unwrap_or(DEFAULT_BASENAME)
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_batch_config() {
        let toml_content = r#"
[batch]
name = "nightly"
description = "Nightly query expansion"

[input]
path = "queries.txt"
queries = [
    { name = "node-name", query = "this:name" },
    { query = ":root.items" },
]

[output]
path = "./out"
formats = ["json", "csv"]

[logging]
level = "debug"
"#;

        let config = BatchConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.batch.name, "nightly");
        assert_eq!(config.input_path(), Some("queries.txt"));
        assert_eq!(config.inline_queries().len(), 2);
        assert_eq!(config.inline_queries()[0], Query::named("node-name", "this:name"));
        assert_eq!(config.output_basename(), "expanded");
        assert_eq!(config.log_level(), "debug");
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_input_section_is_optional() {
        let toml_content = r#"
[batch]
name = "empty"

[output]
path = "./out"
formats = ["txt"]
"#;

        let config = BatchConfig::from_toml_str(toml_content).unwrap();
        assert!(config.input_path().is_none());
        assert!(config.inline_queries().is_empty());
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("QUERY_SYMBOLS_TEST_OUT", "/tmp/expanded");

        let toml_content = r#"
[batch]
name = "env"

[output]
path = "${QUERY_SYMBOLS_TEST_OUT}"
basename = "${QUERY_SYMBOLS_UNSET_VAR}"
formats = ["txt"]
"#;

        let config = BatchConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output.path, "/tmp/expanded");
        assert_eq!(config.output_basename(), "${QUERY_SYMBOLS_UNSET_VAR}");

        std::env::remove_var("QUERY_SYMBOLS_TEST_OUT");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[batch]
name = "bad"

[output]
path = "./out"
formats = ["xml"]
"#;

        let config = BatchConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = BatchConfig::from_toml_str("[batch\nname=").unwrap_err();
        assert!(matches!(err, ExpandError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[batch]
name = "file-test"

[output]
path = "./out"
formats = ["tsv"]
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = BatchConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.batch.name, "file-test");
    }
}
