use anyhow::Result;
use colored::*;
use conveyor_core::pipeline_manager::PipelineManager;

pub fn execute(manager: &PipelineManager, task: Option<&str>) -> Result<()> {
    let task_name = match task {
        Some(name) => name.to_string(),
        None => manager.default_task()?,
    };

    println!("{} {}", "Running task".bold(), task_name.cyan());
    println!();

    // Task output streams from the executor as each task completes
    let summary = manager.run_task(&task_name)?;

    println!();
    if let Some(failed) = summary.failed_task() {
        anyhow::bail!("Task '{}' failed", failed.name);
    }

    println!(
        "{} {}",
        "✓".green().bold(),
        "All tasks completed successfully!".green().bold()
    );

    Ok(())
}
