//! Dependency resolution
//!
//! Expands a requested root task into a linear execution plan in which
//! every prerequisite appears strictly before its dependents. Resolution
//! is a pure read of the registry: no action runs, no path is touched.

use std::collections::HashMap;

use crate::registry::TaskRegistry;
use crate::types::{ConveyorError, ConveyorResult};

/// Dependency-ordered linearization of the tasks to run for one request.
/// Recomputed per invocation, never persisted.
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    pub root: String,
    /// Task names in execution order. A task reachable through multiple
    /// paths appears exactly once.
    pub tasks: Vec<String>,
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    InProgress,
    Done,
}

/// Compute the execution plan for `root`.
///
/// Post-order depth-first traversal: each prerequisite is visited before
/// the task itself, in declaration order, so plans are deterministic.
/// An in-progress marker per task detects cycles; the error lists the
/// cycle's task names in encounter order.
pub fn resolve(registry: &TaskRegistry, root: &str) -> ConveyorResult<ExecutionPlan> {
    let mut marks: HashMap<&str, Mark> = HashMap::new();
    let mut trail: Vec<&str> = Vec::new();
    let mut tasks = Vec::new();

    visit(registry, root, None, &mut marks, &mut trail, &mut tasks)?;

    Ok(ExecutionPlan {
        root: root.to_string(),
        tasks,
    })
}

fn visit<'a>(
    registry: &'a TaskRegistry,
    name: &str,
    required_by: Option<&str>,
    marks: &mut HashMap<&'a str, Mark>,
    trail: &mut Vec<&'a str>,
    plan: &mut Vec<String>,
) -> ConveyorResult<()> {
    let task = match registry.lookup(name) {
        Ok(task) => task,
        Err(ConveyorError::UnknownTask { name, .. }) => {
            return Err(ConveyorError::UnknownTask {
                name,
                required_by: required_by.map(|s| s.to_string()),
            });
        }
        Err(other) => return Err(other),
    };

    match marks.get(task.name.as_str()) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::InProgress) => {
            // The trail from the task's first encounter back to here is the cycle.
            let start = trail
                .iter()
                .position(|&t| t == task.name)
                .unwrap_or_default();
            return Err(ConveyorError::CyclicDependency {
                cycle: trail[start..].iter().map(|s| s.to_string()).collect(),
            });
        }
        None => {}
    }

    marks.insert(&task.name, Mark::InProgress);
    trail.push(&task.name);

    for prerequisite in &task.prerequisites {
        visit(registry, prerequisite, Some(name), marks, trail, plan)?;
    }

    trail.pop();
    marks.insert(&task.name, Mark::Done);
    plan.push(task.name.clone());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::tests::shell_task;

    fn registry_of(tasks: &[(&str, &[&str])]) -> TaskRegistry {
        let mut registry = TaskRegistry::new();
        for (name, prerequisites) in tasks {
            registry
                .register(shell_task(name, prerequisites, "true"))
                .unwrap();
        }
        registry
    }

    #[test]
    fn linear_chain_resolves_dependencies_first() {
        let registry = registry_of(&[
            ("clean", &[]),
            ("copy", &["clean"]),
            ("build", &["copy"]),
        ]);

        let plan = resolve(&registry, "build").unwrap();
        assert_eq!(plan.tasks, vec!["clean", "copy", "build"]);
    }

    #[test]
    fn prerequisites_precede_dependents() {
        let registry = registry_of(&[
            ("clean", &[]),
            ("move-click", &[]),
            ("move-scope", &[]),
            ("build-go", &["clean", "move-click", "move-scope"]),
            ("run", &["build-go"]),
        ]);

        let plan = resolve(&registry, "run").unwrap();
        for (name, prerequisites) in [
            ("build-go", vec!["clean", "move-click", "move-scope"]),
            ("run", vec!["build-go"]),
        ] {
            let task_index = plan.tasks.iter().position(|t| t == name).unwrap();
            for prerequisite in prerequisites {
                let dep_index = plan.tasks.iter().position(|t| t == prerequisite).unwrap();
                assert!(
                    dep_index < task_index,
                    "'{}' should run before '{}'",
                    prerequisite,
                    name
                );
            }
        }
    }

    #[test]
    fn sibling_prerequisites_keep_declaration_order() {
        let registry = registry_of(&[
            ("b", &[]),
            ("a", &[]),
            ("c", &[]),
            ("all", &["c", "a", "b"]),
        ]);

        let plan = resolve(&registry, "all").unwrap();
        assert_eq!(plan.tasks, vec!["c", "a", "b", "all"]);
    }

    #[test]
    fn shared_prerequisite_appears_once() {
        // Diamond: package depends on compile and assets, both depend on clean.
        let registry = registry_of(&[
            ("clean", &[]),
            ("compile", &["clean"]),
            ("assets", &["clean"]),
            ("package", &["compile", "assets"]),
        ]);

        let plan = resolve(&registry, "package").unwrap();
        assert_eq!(plan.tasks, vec!["clean", "compile", "assets", "package"]);
    }

    #[test]
    fn repeated_resolution_is_deterministic() {
        let registry = registry_of(&[
            ("clean", &[]),
            ("compile", &["clean"]),
            ("assets", &["clean"]),
            ("package", &["compile", "assets"]),
        ]);

        let first = resolve(&registry, "package").unwrap();
        let second = resolve(&registry, "package").unwrap();
        assert_eq!(first.tasks, second.tasks);
    }

    #[test]
    fn unknown_root_fails() {
        let registry = registry_of(&[("build", &[])]);

        let err = resolve(&registry, "deploy").unwrap_err();
        assert!(matches!(
            err,
            ConveyorError::UnknownTask { name, required_by: None } if name == "deploy"
        ));
    }

    #[test]
    fn unknown_prerequisite_names_the_dependent() {
        let registry = registry_of(&[("build", &["stage"])]);

        let err = resolve(&registry, "build").unwrap_err();
        match err {
            ConveyorError::UnknownTask { name, required_by } => {
                assert_eq!(name, "stage");
                assert_eq!(required_by.as_deref(), Some("build"));
            }
            other => panic!("expected UnknownTask, got {:?}", other),
        }
    }

    #[test]
    fn two_task_cycle_is_detected() {
        let registry = registry_of(&[("x", &["y"]), ("y", &["x"])]);

        let err = resolve(&registry, "x").unwrap_err();
        match err {
            ConveyorError::CyclicDependency { cycle } => {
                assert_eq!(cycle, vec!["x".to_string(), "y".to_string()]);
            }
            other => panic!("expected CyclicDependency, got {:?}", other),
        }
    }

    #[test]
    fn self_dependency_is_detected() {
        let registry = registry_of(&[("loop", &["loop"])]);

        let err = resolve(&registry, "loop").unwrap_err();
        match err {
            ConveyorError::CyclicDependency { cycle } => {
                assert_eq!(cycle, vec!["loop".to_string()]);
            }
            other => panic!("expected CyclicDependency, got {:?}", other),
        }
    }

    #[test]
    fn cycle_below_the_root_reports_only_the_cycle() {
        let registry = registry_of(&[("a", &["b"]), ("b", &["c"]), ("c", &["b"])]);

        let err = resolve(&registry, "a").unwrap_err();
        match err {
            ConveyorError::CyclicDependency { cycle } => {
                assert_eq!(cycle, vec!["b".to_string(), "c".to_string()]);
            }
            other => panic!("expected CyclicDependency, got {:?}", other),
        }
    }
}
