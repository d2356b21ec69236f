use chrono::Utc;
use uuid::Uuid;

use crate::modules::catalog::domain::entities::{CatalogItem, StoredItem};

use super::types::DuplicateStrategy;

/// What the engine should do with one candidate item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Leave the existing item untouched, count the candidate as skipped.
    Skip,
    /// Rewrite the existing record in place; the caller purges its variant
    /// set before writing.
    Overwrite { existing_id: Uuid },
    /// Insert a new record. `handle`/`title` carry synthesized replacements
    /// when keep-both forged a fresh identity.
    Create {
        handle: Option<String>,
        title: Option<String>,
    },
}

/// Decides between skip, overwrite, and clone-with-new-identity for one
/// candidate against the existing-item lookup result.
pub struct DuplicateResolver;

impl DuplicateResolver {
    pub fn resolve(
        candidate: &CatalogItem,
        existing: Option<&StoredItem>,
        strategy: DuplicateStrategy,
    ) -> Resolution {
        // No handle means no collision check was possible: always new.
        if candidate.handle.is_none() {
            return Resolution::Create {
                handle: None,
                title: None,
            };
        }

        let Some(existing) = existing else {
            return Resolution::Create {
                handle: None,
                title: None,
            };
        };

        match strategy {
            DuplicateStrategy::Skip => Resolution::Skip,
            DuplicateStrategy::Overwrite => Resolution::Overwrite {
                existing_id: existing.id,
            },
            DuplicateStrategy::KeepBoth => {
                let base = candidate.handle.as_deref().unwrap_or_default();
                Resolution::Create {
                    handle: Some(format!("{}-{}", base, Utc::now().timestamp_millis())),
                    title: Some(format!("{} (Copy)", candidate.title)),
                }
            }
        }
    }
}
