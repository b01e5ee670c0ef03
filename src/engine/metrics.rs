use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;

use crate::publish::{PublishError, PublishedObject};
use crate::storage::PartitionLocation;

/// Counts and locations surfaced at the end of a successful write.
#[derive(Debug, Clone)]
pub struct RunMetrics {
    pub processing_date: NaiveDate,
    pub total_read: usize,
    pub valid: usize,
    pub rejected: usize,
    /// Rejected count per reason label, for operators chasing bad input.
    pub reject_reasons: BTreeMap<&'static str, usize>,
    pub location: PartitionLocation
}

#[derive(Debug)]
pub enum PublishOutcome {
    Disabled,
    Published {
        bucket: String,
        objects: Vec<PublishedObject>
    },
    Failed(PublishError)
}

impl PublishOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, PublishOutcome::Failed(_))
    }
}

/// Result of a run whose local partition was fully written.
/// A failed publish is reported here rather than as a run error.
#[derive(Debug)]
pub struct RunReport {
    pub metrics: RunMetrics,
    pub publish: PublishOutcome
}

impl Display for RunMetrics {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "Processing date: {}", self.processing_date)?;
        writeln!(formatter, "Total records read: {}", self.total_read)?;
        writeln!(formatter, "Valid records written: {} -> {}", self.valid, self.location.clean.display())?;

        match &self.location.rejected {
            Some(path) => writeln!(formatter, "Rejected records: {} -> {}", self.rejected, path.display())?,
            None => writeln!(formatter, "Rejected records: {} (no rejected artifact)", self.rejected)?
        }

        for (reason, count) in &self.reject_reasons {
            writeln!(formatter, "  {reason}: {count}")?;
        }

        write!(
            formatter,
            "Daily aggregates: {} -> {}",
            self.location.daily_totals_rows,
            self.location.daily_totals.display()
        )
    }
}

impl Display for PublishOutcome {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PublishOutcome::Disabled => write!(formatter, "Publish: disabled"),
            PublishOutcome::Published { bucket, objects } => {
                write!(formatter, "Publish: {} artifacts -> bucket [{bucket}]", objects.len())?;

                for object in objects {
                    write!(formatter, "\n  {}/{} ({} bytes)", object.bucket, object.key, object.bytes)?;
                }

                Ok(())
            }
            PublishOutcome::Failed(error) => write!(formatter, "Publish: FAILED ({error})")
        }
    }
}

impl Display for RunReport {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "{}", self.metrics)?;
        write!(formatter, "{}", self.publish)
    }
}
