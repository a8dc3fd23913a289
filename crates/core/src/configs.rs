//! Pipeline configuration parsing
//!
//! Pipelines are declared in a `conveyor.yml` file at the pipeline root.
//! Parsing is pure: no task runs and no filesystem path is touched until
//! the parsed configuration is loaded into a registry and executed.

pub mod pipeline;

pub use pipeline::{parse_pipeline_config, Command, CopyConfig, PipelineConfig, TaskConfig};
