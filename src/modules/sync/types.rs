use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::errors::AppResult;
use crate::shared::utils::validation::Validator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    Full,
    ModifiedOnly,
}

/// One sync-all submission. All knobs optional; present values must be
/// positive integers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    #[serde(default)]
    pub modified_only: Option<bool>,
    #[serde(default)]
    pub page_size: Option<i64>,
    #[serde(default)]
    pub max_pages: Option<i64>,
}

impl SyncRequest {
    pub fn mode(&self) -> SyncMode {
        if self.modified_only.unwrap_or(false) {
            SyncMode::ModifiedOnly
        } else {
            SyncMode::Full
        }
    }

    /// Reject bad knobs before any store is contacted.
    pub fn validate(&self) -> AppResult<SyncOptions> {
        Validator::validate_sync_options(self.page_size, self.max_pages)?;
        let defaults = SyncOptions::default();
        Ok(SyncOptions {
            page_size: self.page_size.map(|v| v as u32).unwrap_or(defaults.page_size),
            max_pages: self.max_pages.map(|v| v as u32).unwrap_or(defaults.max_pages),
        })
    }
}

/// Validated per-store sizing handed to syncers.
#[derive(Debug, Clone, Copy)]
pub struct SyncOptions {
    pub page_size: u32,
    pub max_pages: u32,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            page_size: 250,
            max_pages: 10,
        }
    }
}

/// Counters from one store's successful sync.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSyncResult {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub duration_ms: u64,
}

/// Per-store result, one per target, in selection order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSyncOutcome {
    pub store_id: Uuid,
    pub store_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<StoreSyncResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate over all per-store outcomes.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub total_stores: usize,
    pub successful_stores: usize,
    pub failed_stores: usize,
    /// Created-count summed over successful stores only; failed stores
    /// contribute zero.
    pub total_products: usize,
}

impl SyncSummary {
    pub fn from_outcomes(outcomes: &[StoreSyncOutcome]) -> Self {
        let successful_stores = outcomes.iter().filter(|o| o.success).count();
        Self {
            total_stores: outcomes.len(),
            successful_stores,
            failed_stores: outcomes.len() - successful_stores,
            total_products: outcomes
                .iter()
                .filter(|o| o.success)
                .filter_map(|o| o.result.as_ref())
                .map(|result| result.created)
                .sum(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub outcomes: Vec<StoreSyncOutcome>,
    pub summary: SyncSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_defaults_to_full() {
        assert_eq!(SyncRequest::default().mode(), SyncMode::Full);
        let request = SyncRequest {
            modified_only: Some(true),
            ..Default::default()
        };
        assert_eq!(request.mode(), SyncMode::ModifiedOnly);
    }

    #[test]
    fn test_validate_rejects_non_positive_knobs() {
        let request = SyncRequest {
            page_size: Some(-5),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = SyncRequest {
            max_pages: Some(0),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_validate_applies_defaults() {
        let options = SyncRequest::default().validate().unwrap();
        assert_eq!(options.page_size, 250);
        assert_eq!(options.max_pages, 10);
    }
}
