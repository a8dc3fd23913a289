//! Result types for pipeline runs
//!
//! One `TaskResult` per plan entry, in plan order. Results are created
//! fresh per run and never persisted.

/// Terminal status of one plan entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Succeeded,
    Failed,
    /// Never reached: an earlier task in the same plan failed, so this
    /// task's action was not invoked.
    Skipped,
}

/// Outcome of a single task within a run.
#[derive(Debug, Clone)]
pub struct TaskResult {
    pub name: String,
    pub status: TaskStatus,
    /// Captured output: combined stdout/stderr for subprocess actions,
    /// a copy manifest for file-copy actions, or the error text.
    pub output: String,
    /// Exit code of the external command, for subprocess actions.
    pub exit_code: Option<i32>,
}

/// One registered task, as reported by task listings.
#[derive(Debug, Clone)]
pub struct TaskInfo {
    pub name: String,
    pub description: Option<String>,
    pub prerequisites: Vec<String>,
    /// Action kind label: "command" or "copy".
    pub kind: &'static str,
}

/// Outcome of one full plan run, in plan order.
#[derive(Debug)]
pub struct RunSummary {
    pub results: Vec<TaskResult>,
}

impl RunSummary {
    pub fn all_succeeded(&self) -> bool {
        self.results
            .iter()
            .all(|r| r.status == TaskStatus::Succeeded)
    }

    /// The task that stopped the run, if any.
    pub fn failed_task(&self) -> Option<&TaskResult> {
        self.results.iter().find(|r| r.status == TaskStatus::Failed)
    }
}
