use crate::config;
use crate::export::LoadError;
use crate::output::csv_file::CsvError;
use crate::pipeline::ConvertError;
use std::process::ExitCode;

pub const EXIT_USAGE: u8 = 64;
pub const EXIT_IO: u8 = 2;
pub const EXIT_SOFTWARE: u8 = 1;

pub fn exit_code_for_config_error(error: &config::ConfigError) -> ExitCode {
    use config::ConfigError::*;

    match error {
        ConfigDirUnavailable | Io(_) => ExitCode::from(EXIT_IO),
        Parse(_) | Serialize(_) => ExitCode::from(EXIT_SOFTWARE),
    }
}

pub fn exit_code_for_convert_error(error: &ConvertError) -> ExitCode {
    match error {
        ConvertError::InputNotFound(_) | ConvertError::OutputIsInput(_) => {
            ExitCode::from(EXIT_USAGE)
        }
        ConvertError::Load(LoadError::Io { .. }) => ExitCode::from(EXIT_IO),
        ConvertError::Load(
            LoadError::Archive(_) | LoadError::MissingExportData | LoadError::Json(_),
        ) => ExitCode::from(EXIT_SOFTWARE),
        ConvertError::Schema(_) => ExitCode::from(EXIT_SOFTWARE),
        ConvertError::Csv(CsvError::AlreadyExists(_)) => ExitCode::from(EXIT_USAGE),
        ConvertError::Csv(CsvError::Io(_)) => ExitCode::from(EXIT_IO),
        ConvertError::Csv(CsvError::Csv(err)) if err.is_io_error() => ExitCode::from(EXIT_IO),
        ConvertError::Csv(CsvError::Csv(_)) => ExitCode::from(EXIT_SOFTWARE),
    }
}
