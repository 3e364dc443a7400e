//! Process-lifetime memoization of the ratings fetch.
//!
//! The site is hit at most once per run no matter how many times the
//! dashboard asks for ratings. `tokio::sync::OnceCell` provides the
//! single-flight guarantee: concurrent first callers collapse into one
//! network round trip and everyone gets the same stored outcome. Failures
//! are memoized too; recovering from a transient upstream error means
//! restarting the process, same as the original session-cached behavior.

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

use super::{RatingsError, RatingsSnapshot, RatingsSource};

#[derive(Clone)]
pub struct RatingsCache {
    source: Arc<dyn RatingsSource>,
    cell: Arc<OnceCell<Result<RatingsSnapshot, RatingsError>>>,
}

impl RatingsCache {
    pub fn new(source: Arc<dyn RatingsSource>) -> Self {
        RatingsCache {
            source,
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// The memoized fetch outcome, performing the fetch on first access.
    pub async fn get(&self) -> Result<RatingsSnapshot, RatingsError> {
        self.cell
            .get_or_init(|| async {
                info!("Fetching ratings from {}", self.source.name());
                self.source.fetch_ratings().await
            })
            .await
            .clone()
    }
}
