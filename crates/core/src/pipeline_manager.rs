//! High-level pipeline management interface
//!
//! This module provides the [`PipelineManager`], the primary entry point
//! for loading a pipeline and planning or running its tasks. It
//! encapsulates:
//! - Reading and parsing the `conveyor.yml` pipeline file
//! - Loading the parsed tasks into a [`TaskRegistry`]
//! - Building the whole-pipeline dependency graph
//! - Resolving execution plans and running them
//!
//! ## Example
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
//! let plan = manager.get_execution_plan("build")?;
//! let summary = manager.run_task("build")?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use crate::configs::{parse_pipeline_config, PipelineConfig};
use crate::execution::Executor;
use crate::graph::{build_dependency_graph, DependencyGraph};
use crate::registry::TaskRegistry;
use crate::resolver::{resolve, ExecutionPlan};
use crate::results::{RunSummary, TaskInfo};
use crate::types::{ConveyorError, ConveyorResult};

/// Name of the pipeline file expected at the pipeline root.
pub const PIPELINE_FILE_NAME: &str = "conveyor.yml";

/// High-level manager owning one loaded pipeline
#[derive(Debug)]
pub struct PipelineManager {
    pub root: PathBuf,
    pub config: PipelineConfig,
    pub registry: TaskRegistry,
    dependency_graph: DependencyGraph,
}

/// Configuration for initializing a pipeline manager
pub struct PipelineManagerConfig {
    pub pipeline_root: PathBuf,
}

impl PipelineManager {
    /// Load the pipeline file from the given root and validate it.
    ///
    /// Duplicate task names, unknown prerequisites anywhere in the file,
    /// and parse errors are all reported here, before any action can run.
    pub fn new(config: PipelineManagerConfig) -> ConveyorResult<Self> {
        let pipeline_config = Self::load_pipeline_config(&config.pipeline_root)?;
        let registry = TaskRegistry::from_config(&pipeline_config)?;
        let dependency_graph = build_dependency_graph(&registry)?;

        Ok(Self {
            root: config.pipeline_root,
            config: pipeline_config,
            registry,
            dependency_graph,
        })
    }

    /// The task to run when the CLI is given no task name: the pipeline's
    /// declared `default`, or a task literally named `default`.
    pub fn default_task(&self) -> ConveyorResult<String> {
        if let Some(name) = &self.config.default {
            // Declared defaults must exist; catch the typo here rather than
            // at resolution time.
            self.registry.lookup(name)?;
            return Ok(name.clone());
        }

        if self.registry.contains("default") {
            return Ok("default".to_string());
        }

        Err(ConveyorError::Config(
            "No task name given and the pipeline declares no default task".to_string(),
        ))
    }

    /// Compute the execution plan for a task without running anything.
    pub fn get_execution_plan(&self, task_name: &str) -> ConveyorResult<ExecutionPlan> {
        resolve(&self.registry, task_name)
    }

    /// Resolve and run a task, printing each task's output as it completes.
    ///
    /// `Err` means a configuration problem (unknown task, cycle); task
    /// failures are reported through the returned summary.
    pub fn run_task(&self, task_name: &str) -> ConveyorResult<RunSummary> {
        let plan = self.get_execution_plan(task_name)?;
        Executor::new(&self.registry, &self.root).run(&plan)
    }

    /// List registered tasks in declaration order.
    pub fn list_tasks(&self) -> Vec<TaskInfo> {
        self.registry
            .tasks()
            .iter()
            .map(|task| TaskInfo {
                name: task.name.clone(),
                description: task.description.clone(),
                prerequisites: task.prerequisites.clone(),
                kind: task.action.kind(),
            })
            .collect()
    }

    /// The whole-pipeline dependency graph with its cycle report.
    pub fn dependency_graph(&self) -> &DependencyGraph {
        &self.dependency_graph
    }

    fn load_pipeline_config(pipeline_root: &Path) -> ConveyorResult<PipelineConfig> {
        let config_path = pipeline_root.join(PIPELINE_FILE_NAME);
        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            ConveyorError::Config(format!(
                "Failed to read pipeline file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        parse_pipeline_config(&content).map_err(|e| match e {
            ConveyorError::Yaml(inner) => ConveyorError::Config(format!(
                "Failed to parse pipeline file {}: {}",
                config_path.display(),
                inner
            )),
            other => other,
        })
    }
}
