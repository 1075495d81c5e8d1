//! Query cache invalidation contract.

use async_trait::async_trait;

use crate::result::AppResult;

/// Interface to the UI layer's server-data query cache.
///
/// The engine never reads from the cache; it only marks keys stale.
/// `refetch_now = false` avoids visible flicker after a successful
/// optimistic update, while `refetch_now = true` resynchronizes with
/// server truth after a rollback.
#[async_trait]
pub trait QueryCache: Send + Sync + std::fmt::Debug + 'static {
    /// Mark a cache key stale, optionally forcing an immediate refetch.
    async fn invalidate(&self, key: &str, refetch_now: bool) -> AppResult<()>;
}
