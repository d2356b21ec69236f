use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

/// Policy governing what happens when an incoming item's handle matches an
/// already-persisted item. Fixed per job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateStrategy {
    #[default]
    Skip,
    Overwrite,
    KeepBoth,
}

/// One import job submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub store_url: String,
    pub start_page: i64,
    pub end_page: i64,
    #[serde(default, alias = "duplicateStrategy")]
    pub strategy: DuplicateStrategy,
    pub owner_id: Uuid,
    #[serde(default)]
    pub page_size: Option<i64>,
    /// Watermark for the modified-only sibling mode; set by sync callers,
    /// never by direct submissions.
    #[serde(skip)]
    pub modified_since: Option<DateTime<Utc>>,
}

impl ImportRequest {
    pub fn new(store_url: impl Into<String>, start_page: i64, end_page: i64, owner_id: Uuid) -> Self {
        Self {
            store_url: store_url.into(),
            start_page,
            end_page,
            strategy: DuplicateStrategy::default(),
            owner_id,
            page_size: None,
            modified_since: None,
        }
    }

    pub fn with_strategy(mut self, strategy: DuplicateStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// Engine knobs, overridable per deployment through `IMPORT_*` environment
/// variables.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Items committed together before the inter-batch delay applies.
    pub batch_size: usize,
    /// Deliberate rate limit between batches, not an incidental cost.
    pub batch_delay: Duration,
    /// Items requested per remote page.
    pub page_size: u32,
    /// Pause handed to the image archiver between downloads.
    pub image_delay_ms: u64,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            batch_delay: Duration::from_secs(180),
            page_size: 250,
            image_delay_ms: 500,
        }
    }
}

impl ImportConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Self::default();
        Self {
            batch_size: env_or("IMPORT_BATCH_SIZE", defaults.batch_size),
            batch_delay: Duration::from_secs(env_or(
                "IMPORT_BATCH_DELAY_SECS",
                defaults.batch_delay.as_secs(),
            )),
            page_size: env_or("IMPORT_PAGE_SIZE", defaults.page_size),
            image_delay_ms: env_or("IMPORT_IMAGE_DELAY_MS", defaults.image_delay_ms),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

/// Job-scoped progress record. Owned by the job's tracker; consumers only
/// ever see cloned snapshots.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportProgress {
    pub total: usize,
    pub current: usize,
    pub success: usize,
    pub failed: usize,
    pub skipped: usize,
    pub current_item: String,
    pub logs: Vec<String>,
}

/// Immutable snapshot of the final counters, returned when the job settles.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub total: usize,
    pub success: usize,
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
}
