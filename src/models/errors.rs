use thiserror::Error;

/// Why a single source record could not become a canonical transaction.
///
/// These never abort a run; the record is routed to the rejected set.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum RecordError {
    #[error("Required field [{0}] is missing or empty")]
    MissingField(&'static str),
    #[error("Timestamp is not a valid ISO-8601 datetime")]
    InvalidTimestamp,
    #[error("Amount is not a number")]
    InvalidAmount,
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
    #[error("Account id is not an integer")]
    InvalidAccountId
}

impl RecordError {
    /// Stable short label used in run metrics.
    pub fn label(&self) -> &'static str {
        match self {
            RecordError::MissingField(_) => "missing_field",
            RecordError::InvalidTimestamp => "invalid_timestamp",
            RecordError::InvalidAmount => "invalid_amount",
            RecordError::NonPositiveAmount => "non_positive_amount",
            RecordError::InvalidAccountId => "invalid_account_id"
        }
    }
}
