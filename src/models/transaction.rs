use serde::Serialize;

use crate::types::{AccountId, Amount, Timestamp};

/// A validated and normalized transaction.
///
/// Field declaration order is the canonical column order of the clean
/// artifact, so serializing this struct yields rows in schema order.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct CanonicalTransaction {
    /// Opaque identifier, passed through untouched.
    pub transaction_id: String,
    /// Original ISO-8601 text; always parseable.
    pub timestamp: Timestamp,
    pub account_id: AccountId,
    /// Strictly positive, exactly two fractional digits.
    pub amount: Amount,
    /// Three letter code, passed through untouched.
    pub currency: String,
    /// Title cased.
    pub merchant: String,
    /// Title cased.
    pub category: String,
    /// Upper cased two letter code.
    pub country: String
}
