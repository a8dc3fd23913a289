use anyhow::Result;
use colored::*;
use conveyor_core::pipeline_manager::PipelineManager;

pub fn execute(manager: &PipelineManager) -> Result<()> {
    println!("{}", "Tasks".bold().underline());

    let tasks = manager.list_tasks();
    if tasks.is_empty() {
        println!("  {}", "No tasks declared".dimmed());
        return Ok(());
    }

    // Declaration order: the pipeline file is the source of truth
    for task in tasks {
        let mut line = format!("{} {}", task.name.blue().bold(), format!("[{}]", task.kind).dimmed());
        if let Some(description) = &task.description {
            line.push_str(&format!(" {}", description));
        }
        println!("{}", line);

        if !task.prerequisites.is_empty() {
            println!(
                "  {} {}",
                "depends on:".dimmed(),
                task.prerequisites.join(", ")
            );
        }
    }

    Ok(())
}
