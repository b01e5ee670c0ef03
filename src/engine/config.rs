use std::path::PathBuf;

pub const DEFAULT_OUTPUT_ROOT: &str = "data/processed";
pub const DEFAULT_PREFIX: &str = "transactions";

/// Everything a pipeline run is allowed to know about its environment.
/// Built once by the caller; the pipeline never reads process state itself.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root under which `date=<YYYY-MM-DD>` partitions are written.
    pub output_root: PathBuf,
    /// Number of shards classified concurrently. `1` keeps a single pass.
    pub workers: usize,
    pub publish: PublishConfig
}

#[derive(Debug, Clone)]
pub struct PublishConfig {
    pub enabled: bool,
    pub bucket: Option<String>,
    pub prefix: String
}

impl PipelineConfig {
    pub fn new(output_root: impl Into<PathBuf>) -> Self {
        Self {
            output_root: output_root.into(),
            ..Self::default()
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_publish(mut self, publish: PublishConfig) -> Self {
        self.publish = publish;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            workers: 1,
            publish: PublishConfig::default()
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bucket: None,
            prefix: DEFAULT_PREFIX.to_string()
        }
    }
}
