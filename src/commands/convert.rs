use crate::app::AppContext;
use crate::convert::WalkOptions;
use crate::output::csv_file::CsvOptions;
use crate::pipeline::{self, ConvertRequest, OutputTarget};
use crate::{cli, config, exit_codes, output};
use serde_json::json;
use std::process::ExitCode;

pub fn run(args: cli::ConvertArgs, ctx: &AppContext) -> ExitCode {
    let settings = match config::load_settings() {
        Ok(settings) => settings,
        Err(error) => {
            eprintln!("Error: {error}");
            return exit_codes::exit_code_for_config_error(&error);
        }
    };

    let output_target = OutputTarget::resolve(&args.input, args.output.as_deref());
    if output_target == OutputTarget::Stdout && ctx.output_mode.json {
        eprintln!("Error: `--json` cannot be combined with `--output -` (stdout carries the CSV).");
        return ExitCode::from(exit_codes::EXIT_USAGE);
    }

    let request = ConvertRequest {
        input: args.input,
        output: output_target,
        walk: WalkOptions {
            include_archived: args.include_archived || settings.convert.include_archived,
        },
        csv: CsvOptions {
            bom: settings.csv.bom && !args.no_bom,
        },
        overwrite: args.force,
    };

    let summary = match pipeline::convert_file(&request) {
        Ok(summary) => summary,
        Err(error) => {
            eprintln!("Error: {error}");
            return exit_codes::exit_code_for_convert_error(&error);
        }
    };

    let destination = request.output.display();
    let message = format!("Converted {} records to {destination}", summary.records);

    if request.output == OutputTarget::Stdout {
        if !ctx.output_mode.quiet {
            eprintln!("{message}");
        }
        return ExitCode::SUCCESS;
    }

    output::print_value(
        message,
        Some(destination.clone()),
        json!({
            "kind": "convert",
            "input": request.input.display().to_string(),
            "output": destination,
            "records": summary.records,
            "include_archived": request.walk.include_archived,
            "bom": request.csv.bom,
            "skipped": {
                "archived": summary.skipped.archived,
                "trashed": summary.skipped.trashed,
                "unknown": summary.skipped.unknown,
            },
        }),
        &ctx.output_mode,
    )
}
