use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use conveyor_core::pipeline_manager::{PipelineManager, PipelineManagerConfig};
use conveyor_core::ConveyorError;

mod commands;

/// Conveyor - A declarative build-pipeline runner
#[derive(Parser)]
#[command(name = "conveyor")]
#[command(about = "A declarative build-pipeline runner")]
#[command(version)]
struct Cli {
    /// Path to the pipeline root (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pipeline: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a task and its prerequisites
    Run {
        /// Task name (defaults to the pipeline's declared default task)
        task: Option<String>,
    },
    /// Show the execution plan for a task without running it
    Plan {
        /// Task name
        task: String,
    },
    /// List the tasks declared in the pipeline
    List,
    /// Show the task dependency graph
    Graph,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), err);
        std::process::exit(exit_code_for(&err));
    }
}

fn run(cli: Cli) -> Result<()> {
    let manager = PipelineManager::new(PipelineManagerConfig {
        pipeline_root: cli.pipeline,
    })?;

    // Execute command (CLI layer only handles presentation)
    match cli.command {
        Commands::Run { task } => commands::run::execute(&manager, task.as_deref()),
        Commands::Plan { task } => commands::plan::execute(&manager, &task),
        Commands::List => commands::list::execute(&manager),
        Commands::Graph => commands::graph::execute(&manager),
    }
}

/// 2 for configuration errors (unknown task, cycle, bad pipeline file),
/// 1 for anything that failed while running.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<ConveyorError>()
        .map(ConveyorError::exit_code)
        .unwrap_or(1)
}
