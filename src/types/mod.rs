mod errors;
mod monetary;
mod timestamp;

pub use monetary::Amount;
pub use timestamp::Timestamp;

pub type AccountId = i64;
