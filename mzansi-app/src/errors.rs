//! Boundary mapping from collaborator errors to the classified taxonomy
//!
//! Raw collaborator errors never cross into the lifecycle or queue result
//! types; each call site maps them by concern here.

use mzansi_client::ClientError;
use shared::error::{AppError, AuthError};

/// Map a failed classification call
pub(crate) fn classifier_error(err: ClientError) -> AppError {
    match err {
        ClientError::NotConfigured => AppError::NotConfigured,
        other => AppError::classifier(other.to_string()),
    }
}

/// Map a failed remote document store call
pub(crate) fn store_error(err: ClientError) -> AppError {
    match err {
        ClientError::NotConfigured => AppError::NotConfigured,
        other => AppError::store(other.to_string()),
    }
}

/// Map a failed identity call.
///
/// Local validation failures keep their message; provider failures collapse
/// to the fixed auth error set.
pub(crate) fn auth_error(err: ClientError) -> AppError {
    match err {
        ClientError::NotConfigured => AppError::NotConfigured,
        ClientError::Auth(auth) => AppError::Auth(auth),
        ClientError::Validation(message) => AppError::Validation(message),
        _ => AppError::Auth(AuthError::Failed),
    }
}
