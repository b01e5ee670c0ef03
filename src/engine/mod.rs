mod config;
mod errors;
mod metrics;
mod pipeline;
mod source;

pub use config::{PipelineConfig, PublishConfig, DEFAULT_OUTPUT_ROOT, DEFAULT_PREFIX};
pub use metrics::RunReport;
pub use pipeline::Pipeline;
