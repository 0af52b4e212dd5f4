use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self) -> Result<Vec<String>>;
}
