use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmountError {
    #[error("Amount error: {0}")]
    InvalidFormat(String),
}

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("Timestamp error: '{0}' is not an ISO-8601 date or datetime")]
    InvalidFormat(String),
}
