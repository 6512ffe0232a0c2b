//! # CLI Subcommands
//!
//! Contains modules that run the subcommands.

pub mod stat;
pub mod get;
pub mod put;
pub mod dump;
pub mod completions;

const RCH: &str = "unreachable was reached";

#[derive(thiserror::Error,Debug)]
pub enum CommandError {
    #[error("Command could not be interpreted")]
    InvalidCommand,
    #[error("File not found")]
    FileNotFound
}
