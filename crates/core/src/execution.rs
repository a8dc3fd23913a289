//! Task execution module
//!
//! This module handles the actual execution of resolved plans: the
//! file-copy and subprocess action adapters plus the sequential runner
//! that short-circuits on the first failure.

pub mod command;
pub mod copy;
pub mod runner;

pub use command::{CommandOutput, SubprocessAdapter};
pub use copy::CopyAdapter;
pub use runner::Executor;
