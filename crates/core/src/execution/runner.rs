//! Sequential plan runner
//!
//! Executes a resolved plan strictly in order, one action per task.
//! Later tasks may read filesystem side effects of earlier ones, so the
//! order is a correctness requirement. The first failure stops the run:
//! every remaining entry is marked skipped and its action never invoked.

use colored::*;
use std::path::Path;

use crate::execution::command::SubprocessAdapter;
use crate::execution::copy::CopyAdapter;
use crate::registry::{ActionDescriptor, TaskRegistry};
use crate::resolver::ExecutionPlan;
use crate::results::{RunSummary, TaskResult, TaskStatus};
use crate::types::{ConveyorError, ConveyorResult};

/// Get a consistent color for a task name
pub fn get_task_color(task_name: &str) -> Color {
    // Use a simple hash of the task name bytes for consistent colors
    let hash = task_name
        .bytes()
        .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));

    // Label colors distinct from the status colors used for ✓/✗ markers
    let colors = [
        Color::TrueColor {
            r: 147,
            g: 112,
            b: 219,
        }, // Medium slate blue
        Color::TrueColor {
            r: 64,
            g: 224,
            b: 208,
        }, // Turquoise
        Color::TrueColor {
            r: 255,
            g: 140,
            b: 0,
        }, // Dark orange
        Color::TrueColor {
            r: 199,
            g: 21,
            b: 133,
        }, // Medium violet red
        Color::TrueColor {
            r: 72,
            g: 209,
            b: 204,
        }, // Medium turquoise
        Color::TrueColor {
            r: 138,
            g: 43,
            b: 226,
        }, // Blue violet
    ];

    colors[(hash % colors.len() as u64) as usize]
}

/// Runs execution plans against a pipeline root.
pub struct Executor<'a> {
    registry: &'a TaskRegistry,
    root: &'a Path,
    /// Suppress per-task terminal output (used by tests and library callers
    /// that only want the result sequence).
    quiet: bool,
}

impl<'a> Executor<'a> {
    pub fn new(registry: &'a TaskRegistry, root: &'a Path) -> Self {
        Self {
            registry,
            root,
            quiet: false,
        }
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    /// Run every entry of `plan` in order.
    ///
    /// Captured output is printed as each task completes, so a
    /// long-running external command's progress is visible per task
    /// rather than buffered to the end of the run. Task failures are
    /// reported in the summary, not as an `Err`; `Err` is reserved for
    /// a plan referencing tasks missing from the registry.
    pub fn run(&self, plan: &ExecutionPlan) -> ConveyorResult<RunSummary> {
        let mut results = Vec::with_capacity(plan.tasks.len());
        let mut failed = false;

        for name in &plan.tasks {
            let task = self.registry.lookup(name)?;

            if failed {
                results.push(TaskResult {
                    name: task.name.clone(),
                    status: TaskStatus::Skipped,
                    output: String::new(),
                    exit_code: None,
                });
                if !self.quiet {
                    println!(
                        "{} {}",
                        "-".bright_black().bold(),
                        format!("Skipped '{}'", task.name).bright_black()
                    );
                }
                continue;
            }

            if !self.quiet {
                println!(
                    "┌─ {}",
                    format!("Running task '{}'", task.name)
                        .color(get_task_color(&task.name))
                        .bold()
                );
            }

            let result = match &task.action {
                ActionDescriptor::Subprocess { command, env } => {
                    match SubprocessAdapter::new(self.root).run(command, env) {
                        Ok(output) => TaskResult {
                            name: task.name.clone(),
                            status: TaskStatus::Succeeded,
                            output: output.output,
                            exit_code: Some(output.exit_code),
                        },
                        Err(ConveyorError::Subprocess { exit_code, output }) => TaskResult {
                            name: task.name.clone(),
                            status: TaskStatus::Failed,
                            output,
                            exit_code: Some(exit_code),
                        },
                        Err(other) => TaskResult {
                            name: task.name.clone(),
                            status: TaskStatus::Failed,
                            output: other.to_string(),
                            exit_code: None,
                        },
                    }
                }
                ActionDescriptor::FileCopy {
                    sources,
                    dest,
                    allow_empty,
                } => match CopyAdapter::new(self.root).run(sources, dest, *allow_empty) {
                    Ok(manifest) => TaskResult {
                        name: task.name.clone(),
                        status: TaskStatus::Succeeded,
                        output: manifest,
                        exit_code: None,
                    },
                    Err(err) => TaskResult {
                        name: task.name.clone(),
                        status: TaskStatus::Failed,
                        output: err.to_string(),
                        exit_code: None,
                    },
                },
            };

            if !self.quiet {
                self.report(&result);
            }

            if result.status == TaskStatus::Failed {
                failed = true;
            }
            results.push(result);
        }

        Ok(RunSummary { results })
    }

    fn report(&self, result: &TaskResult) {
        if !result.output.is_empty() {
            print!("{}", result.output);
            if !result.output.ends_with('\n') {
                println!();
            }
        }

        match result.status {
            TaskStatus::Succeeded => println!(
                "{} {}",
                "✓".green().bold(),
                format!("Completed '{}'", result.name).color(get_task_color(&result.name))
            ),
            TaskStatus::Failed => println!(
                "{} {}",
                "✗".red().bold(),
                match result.exit_code {
                    Some(code) => format!("Task '{}' failed with exit code {}", result.name, code),
                    None => format!("Task '{}' failed", result.name),
                }
                .red()
            ),
            TaskStatus::Skipped => {}
        }
    }
}
