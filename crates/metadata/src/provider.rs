use blogforge_core::types::SearchQuery;

use crate::MetadataError;
use crate::raw::RawDetail;

/// A metadata provider that can resolve a query to one detail payload.
#[async_trait::async_trait]
pub trait MediaProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Two-stage lookup: search scoped to the query's kind, take the first
    /// hit, fetch its full detail payload with auxiliary sub-resources.
    async fn fetch_media(&self, query: &SearchQuery) -> Result<RawDetail, MetadataError>;
}
