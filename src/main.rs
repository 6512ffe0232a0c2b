//! # Command Line Interface
//!
//! The subcommands are in the `commands` module, the command tree is in `cli.rs`.

use env_logger;
#[cfg(windows)]
use colored;
use log::error;
use rt11kit::commands;
use rt11kit::commands::CommandError;

mod cli;

fn main() -> Result<(),Box<dyn std::error::Error>>
{
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    #[cfg(windows)]
    let _ = colored::control::set_virtual_terminal(true);
    let main_cmd = cli::build_cli();
    let matches = main_cmd.clone().get_matches();

    if let Some(cmd) = matches.subcommand_matches("catalog") {
        return commands::stat::catalog(cmd);
    }
    if let Some(cmd) = matches.subcommand_matches("badblocks") {
        return commands::stat::badblocks(cmd);
    }
    if let Some(cmd) = matches.subcommand_matches("stat") {
        return commands::stat::stat(cmd);
    }
    if let Some(cmd) = matches.subcommand_matches("glob") {
        return commands::stat::glob(cmd);
    }
    if let Some(cmd) = matches.subcommand_matches("get") {
        return commands::get::get(cmd);
    }
    if let Some(cmd) = matches.subcommand_matches("put") {
        return commands::put::put(cmd);
    }
    if let Some(cmd) = matches.subcommand_matches("dump") {
        return commands::dump::dump(cmd);
    }
    if let Some(cmd) = matches.subcommand_matches("completions") {
        return commands::completions::generate(main_cmd,cmd);
    }

    error!("No subcommand was found, try `rt11kit --help`");
    return Err(Box::new(CommandError::InvalidCommand));
}
