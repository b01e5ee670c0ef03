use std::collections::BTreeMap;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::Path;

use chrono::NaiveDate;
use futures::future::try_join_all;
use tokio::task::spawn_blocking;
use tracing::{debug, error, info, warn};

use crate::aggregation::Aggregator;
use crate::engine::config::PipelineConfig;
use crate::engine::errors::PipelineError;
use crate::engine::metrics::{PublishOutcome, RunMetrics, RunReport};
use crate::engine::source::read_source;
use crate::models::{CanonicalTransaction, RawRecord};
use crate::publish::{publish_partition, ObjectStore, PublishError};
use crate::storage::{PartitionLocation, PartitionWriter};
use crate::transform::transform;
use crate::validation::{check, validate};

/// Linear run stages, used to label log events.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
enum Stage {
    InputCheck,
    ValidateTransform,
    Aggregate,
    Write,
    Publish,
    Done
}

impl Display for Stage {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::InputCheck => "input-check",
            Stage::ValidateTransform => "validate-transform",
            Stage::Aggregate => "aggregate",
            Stage::Write => "write",
            Stage::Publish => "publish",
            Stage::Done => "done"
        };
        formatter.write_str(name)
    }
}

/// Output of classifying one contiguous shard of the source.
#[derive(Debug, Default)]
struct Classified {
    clean: Vec<CanonicalTransaction>,
    rejected: Vec<RawRecord>,
    reject_reasons: BTreeMap<&'static str, usize>,
    aggregator: Aggregator
}

impl Classified {
    fn from_records(records: Vec<RawRecord>) -> Self {
        let mut classified = Classified::default();

        for record in records {
            //NOTE: check only re-runs the rules for rejects, to name the reason
            let outcome = if validate(&record) {
                transform(&record)
            } else {
                check(&record).and_then(|()| transform(&record))
            };

            match outcome {
                Ok(transaction) => {
                    classified.aggregator.fold(&transaction);
                    classified.clean.push(transaction);
                }
                Err(reason) => {
                    debug!("Rejected record [{}]: {reason}", record.get("transaction_id").unwrap_or("<none>"));
                    *classified.reject_reasons.entry(reason.label()).or_default() += 1;
                    classified.rejected.push(record);
                }
            }
        }

        classified
    }

    /// Appends a later shard. Shards must be absorbed in source order.
    fn absorb(&mut self, other: Classified) {
        self.clean.extend(other.clean);
        self.rejected.extend(other.rejected);

        for (reason, count) in other.reject_reasons {
            *self.reject_reasons.entry(reason).or_default() += count;
        }

        self.aggregator.merge(other.aggregator);
    }
}

/// Drives one validate -> transform -> aggregate -> write (-> publish) run.
pub struct Pipeline<S: ObjectStore> {
    config: PipelineConfig,
    writer: PartitionWriter,
    store: S
}

impl<S: ObjectStore> Pipeline<S> {
    /// `store` is only used when publishing is enabled in `config`.
    pub fn new(config: PipelineConfig, store: S) -> Self {
        let writer = PartitionWriter::new(config.output_root.clone());

        Self {
            config,
            writer,
            store
        }
    }

    /// Runs the whole pipeline for `processing_date` over the CSV at `source`.
    ///
    /// # Errors
    /// - `SourceNotFound` before anything is written when `source` is missing.
    /// - `SourceUnreadable` when the file cannot be decoded.
    /// - `Write` when any artifact cannot be persisted.
    ///
    /// A publish failure is not an error here; it is reported in the returned
    /// `RunReport` and leaves the local partition in place.
    pub async fn run(&self, source: &Path, processing_date: NaiveDate) -> Result<RunReport, PipelineError> {
        info!("[{}] Checking source {}", Stage::InputCheck, source.display());

        if !source.exists() {
            error!("[{}] Source not found at path: {}", Stage::InputCheck, source.display());
            return Err(PipelineError::SourceNotFound { path: source.to_path_buf() })
        }

        let path = source.to_path_buf();
        let records = spawn_blocking(move || read_source(&path)).await??;
        let total_read = records.len();

        info!("[{}] Classifying {total_read} records on {} worker(s)", Stage::ValidateTransform, self.config.workers);
        let classified = self.classify(records).await?;

        info!(
            "[{}] {} valid, {} rejected; folding {} daily keys",
            Stage::Aggregate,
            classified.clean.len(),
            classified.rejected.len(),
            classified.aggregator.len()
        );
        let Classified { clean, rejected, reject_reasons, aggregator } = classified;
        let aggregates = aggregator.finish();

        info!("[{}] Writing partition [{processing_date}]", Stage::Write);
        let writer = self.writer.clone();
        let location = spawn_blocking(move || writer.write(processing_date, &clean, &rejected, &aggregates)).await??;

        let metrics = RunMetrics {
            processing_date,
            total_read,
            valid: location.clean_rows,
            rejected: location.rejected_rows,
            reject_reasons,
            location
        };

        let publish = self.publish(&metrics.location).await;
        info!("[{}] Run for [{processing_date}] complete", Stage::Done);

        Ok(RunReport { metrics, publish })
    }

    async fn classify(&self, records: Vec<RawRecord>) -> Result<Classified, PipelineError> {
        let workers = self.config.workers.max(1);
        let shard_size = records.len().div_ceil(workers).max(1);
        let mut remaining = records.into_iter();
        let mut handles = Vec::with_capacity(workers);

        loop {
            let shard: Vec<RawRecord> = remaining.by_ref().take(shard_size).collect();

            if shard.is_empty() {
                break;
            }

            handles.push(spawn_blocking(move || Classified::from_records(shard)));
        }

        //NOTE: try_join_all keeps handle order, so shards are absorbed in source order
        let mut classified = Classified::default();

        for shard in try_join_all(handles).await? {
            classified.absorb(shard);
        }

        Ok(classified)
    }

    async fn publish(&self, location: &PartitionLocation) -> PublishOutcome {
        let publish = &self.config.publish;

        if !publish.enabled {
            debug!("[{}] Publishing disabled", Stage::Publish);
            return PublishOutcome::Disabled
        }

        let Some(bucket) = publish.bucket.as_deref().filter(|bucket| !bucket.is_empty()) else {
            warn!("[{}] {}", Stage::Publish, PublishError::MissingBucket);
            return PublishOutcome::Failed(PublishError::MissingBucket)
        };

        info!("[{}] Publishing {} to bucket [{bucket}] under [{}]", Stage::Publish, location.root.display(), publish.prefix);

        match publish_partition(&self.store, self.writer.output_root(), &location.root, bucket, &publish.prefix).await {
            Ok(objects) => PublishOutcome::Published {
                bucket: bucket.to_string(),
                objects
            },
            Err(error) => {
                warn!("[{}] Publish of partition [{}] failed: {error}", Stage::Publish, location.partition_date);
                PublishOutcome::Failed(error)
            }
        }
    }
}
