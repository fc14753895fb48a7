use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub query: String,
}

impl Query {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            name: None,
            query: query.into(),
        }
    }

    pub fn named(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            query: query.into(),
        }
    }
}

impl FromStr for Query {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Query::new(s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedQuery {
    pub name: Option<String>,
    pub original: String,
    pub expanded: String,
    /// False when expansion only trimmed the query.
    pub changed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpansionResult {
    pub generated_at: String,
    pub queries: Vec<ExpandedQuery>,
}

impl ExpansionResult {
    pub fn changed_count(&self) -> usize {
        self.queries.iter().filter(|q| q.changed).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Txt,
    Json,
    Csv,
    Tsv,
}

impl OutputFormat {
    pub const NAMES: [&'static str; 4] = ["txt", "json", "csv", "tsv"];

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Txt => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(OutputFormat::Txt),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Txt));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_changed_count() {
        let result = ExpansionResult {
            generated_at: "2024-01-01T00:00:00Z".to_string(),
            queries: vec![
                ExpandedQuery {
                    name: None,
                    original: ":name".to_string(),
                    expanded: ".name".to_string(),
                    changed: true,
                },
                ExpandedQuery {
                    name: None,
                    original: "a.b".to_string(),
                    expanded: "a.b".to_string(),
                    changed: false,
                },
            ],
        };
        assert_eq!(result.changed_count(), 1);
    }
}
