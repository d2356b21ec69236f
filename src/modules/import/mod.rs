pub mod application;
pub mod domain;

// Re-exports for easy external access
pub use application::service::{DuplicateMatch, DuplicateProbe, ImportService};
pub use domain::engine::BatchImportEngine;
pub use domain::progress::{ImportEvent, ProgressTracker};
pub use domain::resolver::{DuplicateResolver, Resolution};
pub use domain::stream::ImportProgressStream;
pub use domain::types::{
    DuplicateStrategy, ImportConfig, ImportOutcome, ImportProgress, ImportRequest,
};
