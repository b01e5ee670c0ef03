use std::fs::{create_dir_all, remove_file, rename};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use csv::{Writer, WriterBuilder};
use serde::Serialize;
use tracing::{debug, info};

use crate::models::{CanonicalTransaction, DailyAggregate, RawRecord, DAILY_TOTALS_HEADER, REQUIRED_FIELDS};
use crate::storage::errors::WriteError;

pub const CLEAN_ARTIFACT: &str = "transactions_clean.csv";
pub const REJECTED_ARTIFACT: &str = "transactions_rejected.csv";
pub const DAILY_TOTALS_ARTIFACT: &str = "daily_totals.csv";
/// Extension of the in-progress copy an artifact is written to before the rename.
pub const STAGING_EXTENSION: &str = "tmp";

/// Where a written partition lives and how many rows each artifact holds.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PartitionLocation {
    pub partition_date: NaiveDate,
    pub root: PathBuf,
    pub clean: PathBuf,
    pub clean_rows: usize,
    /// `None` when the run produced no rejects; no artifact exists then.
    pub rejected: Option<PathBuf>,
    pub rejected_rows: usize,
    pub daily_totals: PathBuf,
    pub daily_totals_rows: usize
}

/// Materializes one date-partitioned output set under `output_root`.
///
/// Every write replaces the partition's artifacts wholesale, so re-running
/// a date is safe.
#[derive(Debug, Clone)]
pub struct PartitionWriter {
    output_root: PathBuf
}

impl PartitionWriter {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into()
        }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn partition_root(&self, partition_date: NaiveDate) -> PathBuf {
        self.output_root.join(format!("date={}", partition_date.format("%Y-%m-%d")))
    }

    pub fn write(
        &self,
        partition_date: NaiveDate,
        clean: &[CanonicalTransaction],
        rejected: &[RawRecord],
        aggregates: &[DailyAggregate]
    ) -> Result<PartitionLocation, WriteError> {
        let root = self.partition_root(partition_date);

        create_dir_all(&root).map_err(|source| WriteError::CreateDirectory { path: root.clone(), source })?;

        let clean_path = root.join(CLEAN_ARTIFACT);
        write_rows(&clean_path, &REQUIRED_FIELDS, clean)?;
        debug!("Wrote {} clean rows to {}", clean.len(), clean_path.display());

        let rejected_path = root.join(REJECTED_ARTIFACT);
        let rejected_location = if rejected.is_empty() {
            remove_stale(&rejected_path)?;
            None
        } else {
            write_rejected(&rejected_path, rejected)?;
            debug!("Wrote {} rejected rows to {}", rejected.len(), rejected_path.display());
            Some(rejected_path)
        };

        let daily_totals_path = root.join(DAILY_TOTALS_ARTIFACT);
        write_rows(&daily_totals_path, &DAILY_TOTALS_HEADER, aggregates)?;
        debug!("Wrote {} daily total rows to {}", aggregates.len(), daily_totals_path.display());

        info!("Partition [{partition_date}] written to {}", root.display());

        Ok(PartitionLocation {
            partition_date,
            root,
            clean: clean_path,
            clean_rows: clean.len(),
            rejected: rejected_location,
            rejected_rows: rejected.len(),
            daily_totals: daily_totals_path,
            daily_totals_rows: aggregates.len()
        })
    }
}

fn write_rows<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<(), WriteError> {
    write_artifact(path, |writer| {
        writer.write_record(header)?;

        for row in rows {
            writer.serialize(row)?;
        }

        Ok(())
    })
}

fn write_rejected(path: &Path, rejected: &[RawRecord]) -> Result<(), WriteError> {
    let header: Vec<String> = rejected.first()
        .map(|first| first.field_names().map(str::to_string).collect())
        .unwrap_or_default();

    write_artifact(path, |writer| {
        writer.write_record(&header)?;

        for record in rejected {
            writer.write_record(record.values_for(&header))?;
        }

        Ok(())
    })
}

/// Writes through a sibling temporary file and renames it into place, so an
/// artifact is either the previous version or the complete new one.
fn write_artifact<F>(path: &Path, fill: F) -> Result<(), WriteError>
where
    F: FnOnce(&mut Writer<std::fs::File>) -> Result<(), csv::Error>,
{
    let staging = path.with_extension(format!("csv.{STAGING_EXTENSION}"));
    let csv_error = |source: csv::Error| WriteError::Csv { path: path.to_path_buf(), source };

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(&staging)
        .map_err(csv_error)?;

    fill(&mut writer).map_err(csv_error)?;

    writer.flush().map_err(|source| WriteError::Io { path: staging.clone(), source })?;
    drop(writer);

    rename(&staging, path).map_err(|source| WriteError::Io { path: path.to_path_buf(), source })
}

fn remove_stale(path: &Path) -> Result<(), WriteError> {
    if path.exists() {
        remove_file(path).map_err(|source| WriteError::Io { path: path.to_path_buf(), source })?;
        debug!("Removed stale artifact {}", path.display());
    }

    Ok(())
}
