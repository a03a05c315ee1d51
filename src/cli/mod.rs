//! CLI module for labsim.
//!
//! All CLI logic lives here so it can be tested in-process; `main.rs`
//! only parses arguments, installs the log subscriber and calls
//! [`run_cli`].

mod args;
mod commands;
mod output;

pub use args::{Args, DemoKind};
pub use commands::{run, run_cli, RunSummary};
pub use output::{write_frame, Frame};
