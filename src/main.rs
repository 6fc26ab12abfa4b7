mod app;
mod cli;
mod commands;
mod config;
mod convert;
mod exit_codes;
mod export;
mod output;
mod pipeline;

use std::process::ExitCode;

fn main() -> ExitCode {
    app::run()
}
