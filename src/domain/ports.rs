use crate::domain::model::{ExpansionResult, Query};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> Option<&str>;
    fn inline_queries(&self) -> &[Query];
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn output_basename(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn collect(&self) -> Result<Vec<Query>>;
    async fn expand(&self, queries: Vec<Query>) -> Result<ExpansionResult>;
    async fn emit(&self, result: ExpansionResult) -> Result<Vec<String>>;
}
