use crate::core::input::parse_queries;
use crate::core::output::render;
use crate::core::symbols::{transform, trim_query};
use crate::domain::model::{ExpandedQuery, ExpansionResult, OutputFormat, Query};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::{ExpandError, Result};
use std::path::Path;
use std::str::FromStr;

pub struct BatchPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> BatchPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Collect and expand without writing anything.
    pub async fn dry_run(&self) -> Result<Vec<ExpandedQuery>> {
        let queries = self.collect().await?;
        Ok(queries.into_iter().map(expand_query).collect())
    }

    fn output_formats(&self) -> Result<Vec<OutputFormat>> {
        let mut formats: Vec<OutputFormat> = Vec::new();
        for name in self.config.output_formats() {
            let format = OutputFormat::from_str(name).map_err(|reason| {
                ExpandError::InvalidConfigValueError {
                    field: "output.formats".to_string(),
                    value: name.clone(),
                    reason,
                }
            })?;
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        Ok(formats)
    }
}

pub fn expand_query(query: Query) -> ExpandedQuery {
    let expanded = transform(&query.query);
    let changed = expanded != trim_query(&query.query);
    ExpandedQuery {
        name: query.name,
        original: query.query,
        expanded,
        changed,
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for BatchPipeline<S, C> {
    async fn collect(&self) -> Result<Vec<Query>> {
        let mut queries = self.config.inline_queries().to_vec();
        tracing::debug!("Collected {} inline queries", queries.len());

        if let Some(input_path) = self.config.input_path() {
            let data = self.storage.read_file(input_path).await?;
            let from_file = parse_queries(input_path, &data)?;
            tracing::debug!("Read {} queries from {}", from_file.len(), input_path);
            queries.extend(from_file);
        }

        if queries.is_empty() {
            return Err(ExpandError::ValidationError {
                message: "No queries to expand".to_string(),
            });
        }

        Ok(queries)
    }

    async fn expand(&self, queries: Vec<Query>) -> Result<ExpansionResult> {
        let queries: Vec<ExpandedQuery> = queries
            .into_iter()
            .map(|query| {
                let expanded = expand_query(query);
                tracing::debug!("{:?} -> {:?}", expanded.original, expanded.expanded);
                expanded
            })
            .collect();

        Ok(ExpansionResult {
            generated_at: chrono::Utc::now().to_rfc3339(),
            queries,
        })
    }

    async fn emit(&self, result: ExpansionResult) -> Result<Vec<String>> {
        let formats = self.output_formats()?;
        let mut written = Vec::with_capacity(formats.len());

        for format in formats {
            let data = render(&result, format)?;
            let filename = format!("{}.{}", self.config.output_basename(), format.extension());
            let path = Path::new(self.config.output_path())
                .join(filename)
                .to_string_lossy()
                .into_owned();

            self.storage.write_file(&path, &data).await?;
            tracing::debug!("Wrote {} bytes to {}", data.len(), path);
            written.push(path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &[u8]) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn file_count(&self) -> usize {
            self.files.lock().await.len()
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ExpandError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct TestConfig {
        input_path: Option<String>,
        inline: Vec<Query>,
        formats: Vec<String>,
    }

    impl ConfigProvider for TestConfig {
        fn input_path(&self) -> Option<&str> {
            self.input_path.as_deref()
        }

        fn inline_queries(&self) -> &[Query] {
            &self.inline
        }

        fn output_path(&self) -> &str {
            "out"
        }

        fn output_formats(&self) -> &[String] {
            &self.formats
        }

        fn output_basename(&self) -> &str {
            "expanded"
        }
    }

    #[test]
    fn test_expand_query_tracks_changes() {
        let changed = expand_query(Query::named("n", "this:name"));
        assert_eq!(changed.expanded, " $ .name");
        assert!(changed.changed);

        let trimmed_only = expand_query(Query::new("  a.b  "));
        assert_eq!(trimmed_only.expanded, "a.b");
        assert!(!trimmed_only.changed);
    }

    #[tokio::test]
    async fn test_collect_inline_then_file() {
        let storage = MockStorage::with_file("in.txt", b":key\n:value\n");
        let config = TestConfig {
            input_path: Some("in.txt".to_string()),
            inline: vec![Query::named("first", ":root")],
            formats: vec!["txt".to_string()],
        };
        let pipeline = BatchPipeline::new(storage, config);

        let queries = pipeline.collect().await.unwrap();
        let texts: Vec<&str> = queries.iter().map(|q| q.query.as_str()).collect();
        assert_eq!(texts, vec![":root", ":key", ":value"]);
    }

    #[tokio::test]
    async fn test_dry_run_expands_without_writing() {
        let storage = MockStorage::with_file("in.txt", b"arr[:text]\n");
        let config = TestConfig {
            input_path: Some("in.txt".to_string()),
            inline: vec![Query::named("ctx", "self:key")],
            formats: vec!["txt".to_string(), "csv".to_string()],
        };
        let pipeline = BatchPipeline::new(storage.clone(), config);

        let expanded = pipeline.dry_run().await.unwrap();
        let pairs: Vec<(&str, &str)> = expanded
            .iter()
            .map(|q| (q.original.as_str(), q.expanded.as_str()))
            .collect();
        assert_eq!(pairs, vec![("self:key", " $ .key"), ("arr[:text]", "arr[text]")]);
        assert_eq!(storage.file_count().await, 1);
    }

    #[tokio::test]
    async fn test_collect_nothing_is_validation_error() {
        let storage = MockStorage::with_file("unused", b"");
        let config = TestConfig {
            input_path: None,
            inline: vec![],
            formats: vec!["txt".to_string()],
        };
        let pipeline = BatchPipeline::new(storage, config);

        let err = pipeline.collect().await.unwrap_err();
        assert!(matches!(err, ExpandError::ValidationError { .. }));
    }

    #[tokio::test]
    async fn test_emit_writes_each_format_once() {
        let storage = MockStorage::with_file("unused", b"");
        let config = TestConfig {
            input_path: None,
            inline: vec![Query::new("foo :match")],
            formats: vec!["txt".to_string(), "json".to_string(), "TXT".to_string()],
        };
        let pipeline = BatchPipeline::new(storage.clone(), config);

        let queries = pipeline.collect().await.unwrap();
        let result = pipeline.expand(queries).await.unwrap();
        let written = pipeline.emit(result).await.unwrap();

        assert_eq!(written.len(), 2);
        let txt_path = Path::new("out").join("expanded.txt").to_string_lossy().into_owned();
        let txt = storage.get_file(&txt_path).await.unwrap();
        assert_eq!(String::from_utf8(txt).unwrap(), "foo .match\n");
    }

    #[tokio::test]
    async fn test_emit_rejects_unknown_format() {
        let storage = MockStorage::with_file("unused", b"");
        let config = TestConfig {
            input_path: None,
            inline: vec![Query::new(":name")],
            formats: vec!["xml".to_string()],
        };
        let pipeline = BatchPipeline::new(storage, config);

        let result = pipeline.expand(vec![Query::new(":name")]).await.unwrap();
        let err = pipeline.emit(result).await.unwrap_err();
        assert!(matches!(err, ExpandError::InvalidConfigValueError { .. }));
    }
}
