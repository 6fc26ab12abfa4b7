use serde_json::json;
use std::process::ExitCode;

pub mod csv_file;

pub struct OutputMode {
    pub json: bool,
    pub quiet: bool,
}

/// Prints a command result. `--json` wraps it as `{"value", "meta"}`;
/// `quiet_value` replaces the text form under `--quiet`.
pub fn print_value(
    value: String,
    quiet_value: Option<String>,
    meta: serde_json::Value,
    output_mode: &OutputMode,
) -> ExitCode {
    if output_mode.json {
        let payload = json!({
            "value": quiet_value.unwrap_or(value),
            "meta": meta,
        });
        println!("{payload}");
    } else if output_mode.quiet {
        println!("{}", quiet_value.unwrap_or(value));
    } else {
        println!("{value}");
    }

    ExitCode::SUCCESS
}
