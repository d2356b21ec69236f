pub mod concurrency;
pub mod logger;
pub mod validation;

pub use concurrency::{BatchOutcome, BatchRunner, FailedOperation};
pub use validation::Validator;
