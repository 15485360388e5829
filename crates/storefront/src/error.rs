//! Unified error handling.
//!
//! Nothing the storefront does is fatal and nothing is surfaced to the
//! shopper except contact-form validation messages. Internal operations
//! still return `Result<T, AppError>` so failures propagate with `?` up to
//! the storefront boundary, where [`report`] logs them and the caller falls
//! back to a safe default.

use thiserror::Error;

use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// The key-value store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The persisted cart is not valid cart JSON.
    #[error("Corrupt cart data: {0}")]
    CorruptCart(#[from] serde_json::Error),

    /// A markup template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Log a failed operation at the storefront boundary.
///
/// `context` names what was being attempted, e.g. `"render cart"`.
pub fn report(context: &str, error: &AppError) {
    match error {
        AppError::Storage(_) => tracing::warn!(error = %error, "{context} failed"),
        AppError::CorruptCart(_) | AppError::Template(_) => {
            tracing::error!(error = %error, "{context} failed");
        }
    }
}
