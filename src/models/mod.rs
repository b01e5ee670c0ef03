mod daily_aggregate;
mod errors;
mod raw_record;
mod transaction;

pub use daily_aggregate::{AggregateKey, DailyAggregate, DAILY_TOTALS_HEADER};
pub use errors::RecordError;
pub use raw_record::{RawRecord, REQUIRED_FIELDS};
pub use transaction::CanonicalTransaction;
