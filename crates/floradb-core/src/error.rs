use crate::{db::validate::ValidationError, store::StoreError, types::Id};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Public error taxonomy returned across the session boundary.
///
/// `NotFound` deliberately collapses "row absent" and "row owned by someone
/// else" so a caller can never confirm the existence of another owner's
/// record. `Internal` carries only a correlation id outward; the underlying
/// detail goes to the error log.
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("unknown entity '{0}'")]
    UnknownEntity(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("record not found")]
    NotFound,

    #[error("internal error (correlation id: {correlation_id})")]
    Internal { correlation_id: Id },
}

impl Error {
    /// Construct an unknown-entity error from a client-supplied name.
    pub(crate) fn unknown_entity(name: impl Into<String>) -> Self {
        Self::UnknownEntity(name.into())
    }

    /// Construct an invalid-argument error with caller-fixable detail.
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Mint an internal error: log the detail server-side, return only a
    /// correlation id to the caller.
    pub(crate) fn internal(detail: impl fmt::Display) -> Self {
        let correlation_id = Id::generate();
        tracing::error!(%correlation_id, detail = %detail, "internal failure");

        Self::Internal { correlation_id }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_error_hides_detail_behind_correlation_id() {
        let err = Error::internal("connection refused by backing store");

        let rendered = err.to_string();
        assert!(
            !rendered.contains("connection refused"),
            "internal detail must not leak to the caller-facing message"
        );
        assert!(rendered.starts_with("internal error"));
    }

    #[test]
    fn not_found_has_no_ownership_detail() {
        assert_eq!(Error::NotFound.to_string(), "record not found");
    }
}
