use std::str::FromStr;

use crate::models::{RawRecord, RecordError, REQUIRED_FIELDS};
use crate::types::{Amount, Timestamp};

/// Decides whether a raw record is acceptable.
///
/// Never fails; every fault counts as "invalid".
pub fn validate(record: &RawRecord) -> bool {
    check(record).is_ok()
}

/// Same rules as [`validate`], but reports the first rule that was broken.
///
/// Rules, in evaluation order:
/// 1. Every required field is present and non-empty.
/// 2. `timestamp` parses as ISO-8601.
/// 3. `amount` parses as a number and is strictly greater than zero.
pub fn check(record: &RawRecord) -> Result<(), RecordError> {
    for field in REQUIRED_FIELDS {
        if record.get(field).is_none_or(str::is_empty) {
            return Err(RecordError::MissingField(field))
        }
    }

    let timestamp = record.get("timestamp").unwrap_or_default();

    if Timestamp::from_str(timestamp).is_err() {
        return Err(RecordError::InvalidTimestamp)
    }

    let amount = Amount::from_str(record.get("amount").unwrap_or_default())
        .map_err(|_| RecordError::InvalidAmount)?;

    if !amount.is_positive() {
        return Err(RecordError::NonPositiveAmount)
    }

    Ok(())
}
