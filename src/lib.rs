pub mod modules;
pub mod shared;

// Re-exports for easy external access
pub use shared::errors::{AppError, AppResult};
