use crate::domain::model::Query;
use crate::utils::error::{ExpandError, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::io::{AsyncRead, AsyncReadExt};

/// A JSON input entry: either a bare query string or a `{ name, query }` object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonEntry {
    Bare(String),
    Named(Query),
}

impl From<JsonEntry> for Query {
    fn from(entry: JsonEntry) -> Self {
        match entry {
            JsonEntry::Bare(query) => Query::new(query),
            JsonEntry::Named(query) => query,
        }
    }
}

/// Parse the contents of an input file. `.json` is an array of entries;
/// anything else is one query per line with blank lines skipped.
pub fn parse_queries(path: &str, data: &[u8]) -> Result<Vec<Query>> {
    let is_json = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let entries: Vec<JsonEntry> = serde_json::from_slice(data)?;
        return Ok(entries.into_iter().map(Query::from).collect());
    }

    let text = std::str::from_utf8(data).map_err(|e| ExpandError::ProcessingError {
        message: format!("Input file '{}' is not valid UTF-8: {}", path, e),
    })?;

    Ok(parse_lines(text))
}

/// Read a line-based query list from a stream such as stdin.
pub async fn read_queries<R: AsyncRead + Unpin>(mut reader: R) -> Result<Vec<Query>> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer).await?;
    Ok(parse_lines(&buffer))
}

pub fn parse_lines(text: &str) -> Vec<Query> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(Query::new)
        .collect()
}
