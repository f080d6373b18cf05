//! CLI argument parsing and command handling.

mod args;

pub use args::{AnalyzeArgs, Cli, Command, ConfigAction, ModelsAction};
