use std::str::FromStr;

use crate::models::{CanonicalTransaction, RawRecord, RecordError};
use crate::types::{AccountId, Amount, Timestamp};

/// Maps a validated raw record onto the canonical schema.
///
/// Pure and deterministic. Expected to be called only on records that passed
/// validation, but it never panics: conditions validation does not look at
/// (a non-integer account id, an amount that rounds to zero) come back as a
/// `RecordError` so the caller can reject the record.
pub fn transform(record: &RawRecord) -> Result<CanonicalTransaction, RecordError> {
    let timestamp = Timestamp::from_str(field(record, "timestamp")?)
        .map_err(|_| RecordError::InvalidTimestamp)?;

    let account_id = field(record, "account_id")?.trim()
        .parse::<AccountId>()
        .map_err(|_| RecordError::InvalidAccountId)?;

    let amount = Amount::from_str(field(record, "amount")?)
        .map_err(|_| RecordError::InvalidAmount)?
        .round_to_cents();

    if !amount.is_positive() {
        return Err(RecordError::NonPositiveAmount)
    }

    Ok(CanonicalTransaction {
        transaction_id: field(record, "transaction_id")?.to_string(),
        timestamp,
        account_id,
        amount,
        currency: field(record, "currency")?.to_string(),
        merchant: title_case(field(record, "merchant")?),
        category: title_case(field(record, "category")?),
        country: field(record, "country")?.to_uppercase()
    })
}

/// Uppercases every letter that starts a word and lowercases the rest.
/// Any non-letter character ends a word.
pub fn title_case(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut at_word_start = true;

    for character in value.chars() {
        if character.is_alphabetic() {
            if at_word_start {
                result.extend(character.to_uppercase());
            } else {
                result.extend(character.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(character);
            at_word_start = true;
        }
    }

    result
}

fn field<'a>(record: &'a RawRecord, name: &'static str) -> Result<&'a str, RecordError> {
    record.get(name).ok_or(RecordError::MissingField(name))
}
