mod config;
mod convert;

use crate::app::AppContext;
use crate::cli;
use std::process::ExitCode;

pub fn dispatch(command: cli::Commands, ctx: &AppContext) -> ExitCode {
    match command {
        cli::Commands::Convert(args) => convert::run(args, ctx),
        cli::Commands::Config(args) => config::run(args, ctx),
    }
}
