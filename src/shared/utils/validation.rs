use regex::Regex;

use crate::shared::errors::AppError;

pub struct Validator;

impl Validator {
    pub fn validate_store_url(url: &str) -> Result<(), AppError> {
        if url.trim().is_empty() {
            return Err(AppError::Validation(
                "Store URL cannot be empty".to_string(),
            ));
        }

        let re = Regex::new(r"^https?://[^\s/]+").map_err(|e| {
            AppError::Internal(format!("Failed to compile URL pattern: {}", e))
        })?;
        if !re.is_match(url.trim()) {
            return Err(AppError::Validation(format!(
                "Store URL must start with http:// or https://, got '{}'",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_page_range(start_page: i64, end_page: i64) -> Result<(), AppError> {
        if start_page < 1 {
            return Err(AppError::Validation(
                "Start page must be at least 1".to_string(),
            ));
        }
        if end_page < start_page {
            return Err(AppError::Validation(format!(
                "End page {} cannot be before start page {}",
                end_page, start_page
            )));
        }
        Ok(())
    }

    pub fn validate_positive(value: i64, name: &str) -> Result<(), AppError> {
        if value <= 0 {
            return Err(AppError::Validation(format!(
                "{} must be a positive integer, got {}",
                name, value
            )));
        }
        Ok(())
    }

    /// Sync submission knobs are optional; present values must be positive.
    pub fn validate_sync_options(
        page_size: Option<i64>,
        max_pages: Option<i64>,
    ) -> Result<(), AppError> {
        if let Some(page_size) = page_size {
            Self::validate_positive(page_size, "pageSize")?;
        }
        if let Some(max_pages) = max_pages {
            Self::validate_positive(max_pages, "maxPages")?;
        }
        Ok(())
    }
}
