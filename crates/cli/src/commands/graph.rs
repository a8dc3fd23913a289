use anyhow::Result;
use colored::*;
use conveyor_core::pipeline_manager::PipelineManager;

pub fn execute(manager: &PipelineManager) -> Result<()> {
    println!("{}", "Task Dependency Graph:".bold().underline());

    let dep_graph = manager.dependency_graph();

    if !dep_graph.cycles.is_empty() {
        let cycles_description = dep_graph
            .cycles
            .iter()
            .map(|cycle| {
                let mut path = cycle.clone();
                if let Some(first) = path.first().cloned() {
                    path.push(first);
                }
                path.join(" -> ")
            })
            .collect::<Vec<_>>()
            .join("; ");

        println!(
            "{} {}",
            "Warning:".yellow().bold(),
            format!("Circular dependencies detected: {}", cycles_description).yellow()
        );
    }

    for node_index in dep_graph.graph.node_indices() {
        let task_name = &dep_graph.graph[node_index];
        println!("{}", task_name.blue().bold());

        let prerequisites = dep_graph.prerequisites_of(node_index);
        if !prerequisites.is_empty() {
            println!("  {} {}", "depends on:".dimmed(), prerequisites.join(", "));
        } else {
            println!("  {}", "no dependencies".dimmed());
        }
        println!();
    }

    Ok(())
}
