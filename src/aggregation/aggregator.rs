use std::collections::BTreeMap;

use crate::models::{AggregateKey, CanonicalTransaction, DailyAggregate};

/// Folds canonical transactions into per-(account, date) totals.
///
/// Amounts are exact decimals, so folding order never changes a total. That
/// lets partial aggregators built over disjoint shards be merged freely.
#[derive(Debug, Default, Clone)]
pub struct Aggregator {
    totals: BTreeMap<AggregateKey, DailyAggregate>
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            totals: BTreeMap::new()
        }
    }

    /// Adds one transaction to the total of its key, creating the key on first sight.
    pub fn fold(&mut self, transaction: &CanonicalTransaction) {
        let date = transaction.timestamp.date();

        self.totals.entry((transaction.account_id, date))
            .or_insert_with(|| DailyAggregate::new(transaction.account_id, date))
            .add(transaction.amount);
    }

    /// Sums another partial aggregation into this one, key by key.
    pub fn merge(&mut self, other: Aggregator) {
        for partial in other.totals.into_values() {
            self.totals.entry(partial.key())
                .and_modify(|existing| existing.absorb(&partial))
                .or_insert(partial);
        }
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Finalizes the fold. Rows come out sorted by account id, then date.
    pub fn finish(self) -> Vec<DailyAggregate> {
        self.totals.into_values().collect()
    }
}

impl<'a> FromIterator<&'a CanonicalTransaction> for Aggregator {
    fn from_iter<I: IntoIterator<Item = &'a CanonicalTransaction>>(transactions: I) -> Self {
        let mut aggregator = Aggregator::new();

        for transaction in transactions {
            aggregator.fold(transaction);
        }

        aggregator
    }
}
