mod errors;
mod partition_writer;
#[cfg(test)]
mod tests;

pub use errors::WriteError;
pub use partition_writer::{PartitionLocation, PartitionWriter, STAGING_EXTENSION};
#[cfg(test)]
pub use partition_writer::{CLEAN_ARTIFACT, DAILY_TOTALS_ARTIFACT, REJECTED_ARTIFACT};
