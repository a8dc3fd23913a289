//! Task registry
//!
//! In-memory store of named tasks. Tasks are registered once at startup,
//! before any resolution or execution begins, and the registry is read-only
//! afterwards. Registration order is preserved so that plans and listings
//! stay deterministic.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::configs::{Command, PipelineConfig, TaskConfig};
use crate::types::{ConveyorError, ConveyorResult};

/// What a task does when it runs. Immutable once registered.
#[derive(Debug, Clone)]
pub enum ActionDescriptor {
    /// Copy every file matched by `sources` (glob patterns resolved against
    /// the pipeline root) into `dest`, creating the directory if absent.
    FileCopy {
        sources: Vec<String>,
        dest: PathBuf,
        allow_empty: bool,
    },
    /// Run an external command, blocking until it exits. The command payload
    /// is opaque: it is forwarded verbatim, never parsed or validated.
    Subprocess {
        command: Command,
        env: BTreeMap<String, String>,
    },
}

impl ActionDescriptor {
    /// Short label for listings.
    pub fn kind(&self) -> &'static str {
        match self {
            ActionDescriptor::FileCopy { .. } => "copy",
            ActionDescriptor::Subprocess { .. } => "command",
        }
    }
}

/// A named unit of work with prerequisites and an action.
#[derive(Debug, Clone)]
pub struct Task {
    pub name: String,
    pub description: Option<String>,
    /// Prerequisite task names in declaration order. Order does not imply
    /// execution order by itself, but it is the tie-break between siblings
    /// when a plan is linearized.
    pub prerequisites: Vec<String>,
    pub action: ActionDescriptor,
}

/// Name-keyed task store preserving registration order.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: Vec<Task>,
    index: HashMap<String, usize>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a task. Fails if a task with the same name already exists.
    pub fn register(&mut self, task: Task) -> ConveyorResult<()> {
        if self.index.contains_key(&task.name) {
            return Err(ConveyorError::DuplicateTask(task.name.clone()));
        }
        self.index.insert(task.name.clone(), self.tasks.len());
        self.tasks.push(task);
        Ok(())
    }

    /// Look up a task by name.
    pub fn lookup(&self, name: &str) -> ConveyorResult<&Task> {
        self.index
            .get(name)
            .map(|&i| &self.tasks[i])
            .ok_or_else(|| ConveyorError::UnknownTask {
                name: name.to_string(),
                required_by: None,
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All registered tasks in registration order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Build a registry from a parsed pipeline file, preserving the file's
    /// declaration order.
    pub fn from_config(config: &PipelineConfig) -> ConveyorResult<Self> {
        let mut registry = Self::new();
        for task_config in &config.tasks {
            registry.register(task_from_config(task_config)?)?;
        }
        Ok(registry)
    }
}

fn task_from_config(config: &TaskConfig) -> ConveyorResult<Task> {
    let action = match (&config.command, &config.copy) {
        (Some(command), None) => ActionDescriptor::Subprocess {
            command: command.clone(),
            env: config.env.clone().unwrap_or_default(),
        },
        (None, Some(copy)) => ActionDescriptor::FileCopy {
            sources: copy.sources.clone(),
            dest: PathBuf::from(&copy.dest),
            allow_empty: copy.allow_empty,
        },
        // parse_pipeline_config rejects these before we get here
        _ => {
            return Err(ConveyorError::Config(format!(
                "Task '{}' must declare exactly one of 'command' or 'copy'",
                config.name
            )));
        }
    };

    Ok(Task {
        name: config.name.clone(),
        description: config.description.clone(),
        prerequisites: config.dependencies.clone().unwrap_or_default(),
        action,
    })
}
