use crate::app::AppContext;
use crate::{cli, config, exit_codes, output};
use serde_json::json;
use std::process::ExitCode;

pub fn run(args: cli::ConfigArgs, ctx: &AppContext) -> ExitCode {
    let path = match config::config_path() {
        Ok(path) => path,
        Err(error) => {
            eprintln!("Error: {error}");
            return exit_codes::exit_code_for_config_error(&error);
        }
    };

    match args.command {
        cli::ConfigCommands::Path => output::print_value(
            path.display().to_string(),
            None,
            json!({
                "kind": "config-path",
                "path": path.display().to_string(),
                "exists": path.exists(),
            }),
            &ctx.output_mode,
        ),
        cli::ConfigCommands::Show => {
            let settings = match config::load_settings_from(&path) {
                Ok(settings) => settings,
                Err(error) => {
                    eprintln!("Error: {error}");
                    return exit_codes::exit_code_for_config_error(&error);
                }
            };

            let text = match settings.to_toml() {
                Ok(text) => text,
                Err(error) => {
                    eprintln!("Error: {error}");
                    return exit_codes::exit_code_for_config_error(&error);
                }
            };

            output::print_value(
                text.trim_end().to_string(),
                None,
                json!({
                    "kind": "config-show",
                    "path": path.display().to_string(),
                    "settings": settings,
                }),
                &ctx.output_mode,
            )
        }
    }
}
