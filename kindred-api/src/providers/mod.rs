//! External providers: face comparison and the payment gateway. Both are
//! configuration-selected enums with an always-success mock variant and a
//! network-backed variant, so tests exercise either path deterministically.
//! Provider failures stay distinct from store failures: callers must be
//! able to tell "try again later" from "this needs new input".

pub mod face;
pub mod payment;

pub use face::{FaceMatch, FaceVerifier};
pub use payment::{Invoice, PaymentProvider};

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Transport(String),
    #[error("provider rejected the request: {0}")]
    Rejected(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::Transport(err.to_string())
    }
}

impl From<ProviderError> for kindred_shared::errors::AppError {
    fn from(err: ProviderError) -> Self {
        tracing::error!(error = %err, "external provider failure");
        kindred_shared::errors::AppError::new(
            kindred_shared::errors::ErrorCode::ProviderUnavailable,
            err.to_string(),
        )
    }
}
