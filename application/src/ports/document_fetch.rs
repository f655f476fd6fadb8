//! Document fetch port
//!
//! Returns the best embedded structured-data blob a page exposes. How the
//! page was obtained (plain HTTP, rendering, polling for late data) is the
//! adapter's business.

use super::fetch_error::FetchError;
use async_trait::async_trait;
use serde_json::Value;

#[async_trait]
pub trait DocumentFetchPort: Send + Sync {
    /// Fetch `url` and return its embedded data, `None` if the page had none.
    async fn fetch_document(&self, url: &str) -> Result<Option<Value>, FetchError>;
}
