use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{ConveyorError, ConveyorResult};

/// A subprocess invocation: either an opaque shell command string or an
/// explicit program-plus-arguments list run without a shell.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Command {
    Single(String),
    Multiple(Vec<String>),
}

/// File-copy action: glob patterns resolved against the pipeline root,
/// matched files copied into `dest` preserving their base names.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CopyConfig {
    pub sources: Vec<String>,
    pub dest: String,
    /// Allow a source pattern to match nothing without failing the task.
    #[serde(default)]
    pub allow_empty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TaskConfig {
    pub name: String,
    pub description: Option<String>,
    pub dependencies: Option<Vec<String>>,
    pub command: Option<Command>,
    pub copy: Option<CopyConfig>,
    /// Environment overrides layered on top of the inherited environment.
    /// Only meaningful for `command` tasks.
    pub env: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PipelineConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Task run when the CLI is given no task name. Falls back to a task
    /// literally named `default` when absent.
    pub default: Option<String>,
    pub tasks: Vec<TaskConfig>,
}

pub fn parse_pipeline_config(yaml_str: &str) -> ConveyorResult<PipelineConfig> {
    let config: PipelineConfig = serde_yaml::from_str(yaml_str)?;

    // Each task carries exactly one action.
    for task in &config.tasks {
        match (&task.command, &task.copy) {
            (Some(_), Some(_)) => {
                return Err(ConveyorError::Config(format!(
                    "Task '{}' declares both 'command' and 'copy'",
                    task.name
                )));
            }
            (None, None) => {
                return Err(ConveyorError::Config(format!(
                    "Task '{}' declares neither 'command' nor 'copy'",
                    task.name
                )));
            }
            _ => {}
        }

        if task.env.is_some() && task.command.is_none() {
            return Err(ConveyorError::Config(format!(
                "Task '{}' declares 'env' but has no 'command'",
                task.name
            )));
        }
    }

    Ok(config)
}
