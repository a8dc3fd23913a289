//! Subprocess action adapter
//!
//! Runs an external command, blocking until it exits, and captures its
//! exit code plus combined stdout/stderr as a single text blob. The
//! command payload is opaque: shell strings are handed to `sh -c`
//! verbatim, argv lists are spawned directly.

use std::collections::BTreeMap;
use std::path::Path;
use std::process::Command as ProcessCommand;

use crate::configs::Command;
use crate::types::{ConveyorError, ConveyorResult};

/// Captured outcome of a finished command.
#[derive(Debug)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub output: String,
}

/// Executes subprocess actions with the pipeline root as working directory.
pub struct SubprocessAdapter<'a> {
    root: &'a Path,
}

impl<'a> SubprocessAdapter<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    /// Run `command` with `env` layered on top of the inherited environment.
    ///
    /// A non-zero exit is an error carrying the exit code and captured
    /// output; a command that cannot be spawned surfaces the IO error.
    pub fn run(
        &self,
        command: &Command,
        env: &BTreeMap<String, String>,
    ) -> ConveyorResult<CommandOutput> {
        let mut process = match command {
            Command::Single(shell_command) => {
                let mut process = ProcessCommand::new("sh");
                process.arg("-c").arg(shell_command);
                process
            }
            Command::Multiple(argv) => {
                let program = argv.first().ok_or_else(|| {
                    ConveyorError::Config("Command list must not be empty".to_string())
                })?;
                let mut process = ProcessCommand::new(program);
                process.args(&argv[1..]);
                process
            }
        };

        process.current_dir(self.root);
        for (key, value) in env {
            process.env(key, value);
        }

        let captured = process.output()?;

        let mut output = String::from_utf8_lossy(&captured.stdout).into_owned();
        output.push_str(&String::from_utf8_lossy(&captured.stderr));

        let exit_code = captured.status.code().unwrap_or(-1);
        if !captured.status.success() {
            return Err(ConveyorError::Subprocess { exit_code, output });
        }

        Ok(CommandOutput { exit_code, output })
    }
}
