pub mod orchestrator;
pub mod syncer;
pub mod types;

// Re-exports for easy external access
pub use orchestrator::MultiStoreSyncOrchestrator;
pub use syncer::{CatalogSyncer, StoreSyncer};
pub use types::{
    StoreSyncOutcome, StoreSyncResult, SyncMode, SyncOptions, SyncReport, SyncRequest, SyncSummary,
};
