use anyhow::Result;
use colored::*;
use conveyor_core::pipeline_manager::PipelineManager;

pub fn execute(manager: &PipelineManager, task: &str) -> Result<()> {
    println!("{} {}", "Execution plan for".bold(), task.cyan());

    // Pure read of the registry: nothing runs, no path is touched
    let plan = manager.get_execution_plan(task)?;

    println!("\n{}:", "Execution order".bold());
    for (i, task_name) in plan.tasks.iter().enumerate() {
        println!("  {}. {}", i + 1, task_name);
    }

    Ok(())
}
