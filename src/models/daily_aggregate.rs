use chrono::NaiveDate;
use serde::Serialize;

use crate::types::{AccountId, Amount};

pub const DAILY_TOTALS_HEADER: [&str; 4] = ["account_id", "date", "total_amount", "transaction_count"];

/// Grouping key for daily totals. Ordering is account first, then date,
/// which is also the order rows are written in.
pub type AggregateKey = (AccountId, NaiveDate);

/// Running totals for one account on one calendar date.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct DailyAggregate {
    pub account_id: AccountId,
    pub date: NaiveDate,
    pub total_amount: Amount,
    pub transaction_count: u64
}

impl DailyAggregate {
    pub fn new(account_id: AccountId, date: NaiveDate) -> Self {
        Self {
            account_id,
            date,
            total_amount: Amount::new(),
            transaction_count: 0
        }
    }

    pub fn key(&self) -> AggregateKey {
        (self.account_id, self.date)
    }

    pub fn add(&mut self, amount: Amount) {
        self.total_amount += amount;
        self.transaction_count += 1;
    }

    /// Folds another partial total for the same key into this one.
    pub fn absorb(&mut self, other: &DailyAggregate) {
        self.total_amount += other.total_amount;
        self.transaction_count += other.transaction_count;
    }
}
