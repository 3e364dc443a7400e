pub mod cache;
pub mod client;
pub mod parser;

pub use cache::RatingsCache;
pub use client::{MasseyClient, RatingsSource};
pub use parser::parse_ratings;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Team name → Massey rating. A `BTreeMap` so the team list comes out in
/// the sorted order the UI selectors want.
pub type RatingsTable = BTreeMap<String, f64>;

/// One successful fetch: the parsed table plus when it was taken.
#[derive(Debug, Clone, Serialize)]
pub struct RatingsSnapshot {
    pub teams: RatingsTable,
    pub fetched_at: DateTime<Utc>,
}

impl RatingsSnapshot {
    pub fn new(teams: RatingsTable) -> Self {
        RatingsSnapshot {
            teams,
            fetched_at: Utc::now(),
        }
    }
}

/// Fetch-level failures. Any of these aborts the fetch and leaves the UI
/// without selectors; row-level problems are [`RowParseError`] and are
/// recovered per row instead.
///
/// `Clone` because the cache memoizes the failed outcome as well as the
/// successful one.
#[derive(Debug, Clone, Error)]
pub enum RatingsError {
    /// Transport failure or non-success HTTP status.
    #[error("ratings request failed: {0}")]
    Fetch(String),

    /// Neither lookup tier matched — the upstream markup likely changed.
    #[error("no ratings table found in page (markup may have changed)")]
    TableNotFound,

    /// Table located but its body has zero rows.
    #[error("ratings table contains no rows")]
    EmptyTable,

    /// Every row was dropped; distinct from a missing table so the two
    /// failure modes stay diagnosable.
    #[error("ratings table had rows but none parsed cleanly ({dropped} dropped)")]
    NoValidRatings { dropped: usize },
}

/// Why a single table row was skipped. Never aborts the fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowParseError {
    #[error("row has {found} cells, need at least 3")]
    MissingColumns { found: usize },

    #[error("team name cell is empty")]
    EmptyTeamName,

    #[error("rating cell has no detail element")]
    MissingDetail,

    #[error("rating text {text:?} is not a number")]
    BadRating { text: String },
}
