use thiserror::Error;

/// The main error type for Conveyor operations
#[derive(Debug, Error)]
pub enum ConveyorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Task '{0}' is already registered")]
    DuplicateTask(String),

    #[error("Unknown task '{name}'{}", required_by_suffix(.required_by))]
    UnknownTask {
        name: String,
        required_by: Option<String>,
    },

    #[error("Circular dependency detected: {}", format_cycle(.cycle))]
    CyclicDependency { cycle: Vec<String> },

    #[error("Source pattern '{0}' matched no files")]
    SourceUnmatched(String),

    #[error("Command failed with exit code {exit_code}")]
    Subprocess { exit_code: i32, output: String },
}

fn required_by_suffix(required_by: &Option<String>) -> String {
    match required_by {
        Some(parent) => format!(" (required by '{}')", parent),
        None => String::new(),
    }
}

/// Render a cycle as `a -> b -> a`, closing the loop back to its start.
fn format_cycle(cycle: &[String]) -> String {
    let mut path = cycle.to_vec();
    if let Some(first) = path.first().cloned() {
        path.push(first);
    }
    path.join(" -> ")
}

impl ConveyorError {
    /// Whether this error was detected before any action ran.
    ///
    /// Configuration errors (bad pipeline file, unknown task, cycle) are
    /// reported with a distinct process exit code so callers can tell a
    /// misconfigured pipeline apart from a failing build step.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ConveyorError::Yaml(_)
                | ConveyorError::Config(_)
                | ConveyorError::DuplicateTask(_)
                | ConveyorError::UnknownTask { .. }
                | ConveyorError::CyclicDependency { .. }
        )
    }

    /// Process exit code for this error: 2 for configuration errors,
    /// 1 for execution-time failures.
    pub fn exit_code(&self) -> i32 {
        if self.is_configuration_error() {
            2
        } else {
            1
        }
    }
}

/// Result type alias for Conveyor operations
pub type ConveyorResult<T> = Result<T, ConveyorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_error_reports_closed_path() {
        let err = ConveyorError::CyclicDependency {
            cycle: vec!["x".to_string(), "y".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Circular dependency detected: x -> y -> x"
        );
    }

    #[test]
    fn configuration_errors_map_to_exit_code_2() {
        let config_err = ConveyorError::UnknownTask {
            name: "deploy".to_string(),
            required_by: None,
        };
        assert_eq!(config_err.exit_code(), 2);

        let runtime_err = ConveyorError::Subprocess {
            exit_code: 127,
            output: String::new(),
        };
        assert_eq!(runtime_err.exit_code(), 1);
    }
}
