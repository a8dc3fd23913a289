//! Conveyor Core Library
//!
//! This is the core library for the Conveyor build-pipeline runner. It
//! provides the task registry, dependency resolution, and the execution
//! engine that runs file-copy and subprocess actions in dependency order.
//!
//! ## Architecture
//!
//! The core library is organized into several modules:
//!
//! - [`pipeline_manager`] - High-level pipeline loading and execution interface
//! - [`registry`] - Name-keyed task store with the action descriptors
//! - [`resolver`] - Expands a root task into a dependency-ordered plan
//! - [`execution`] - Action adapters and the sequential plan runner
//! - [`graph`] - Whole-pipeline dependency graph and cycle reporting
//! - [`configs`] - YAML pipeline file parsing
//! - [`results`] - Result types for plan runs and task listings
//! - [`types`] - Common error types and type aliases
//!
//! ## Usage
//!
//! The primary entry point is the [`PipelineManager`] which loads a
//! `conveyor.yml` and plans or runs its tasks:
//!
//! ```rust,no_run
//! use conveyor_core::pipeline_manager::{PipelineManager, PipelineManagerConfig};
//! use std::path::PathBuf;
//!
//! # fn example() -> conveyor_core::types::ConveyorResult<()> {
//! let manager = PipelineManager::new(PipelineManagerConfig {
//!     pipeline_root: PathBuf::from("."),
//! })?;
//!
//! let summary = manager.run_task("build")?;
//! # Ok(())
//! # }
//! ```

pub mod configs;
pub mod execution;
pub mod graph;
pub mod pipeline_manager;
pub mod registry;
pub mod resolver;
pub mod results;
pub mod types;

// Re-export the main types for easier usage
pub use pipeline_manager::{PipelineManager, PipelineManagerConfig};
pub use types::{ConveyorError, ConveyorResult};
