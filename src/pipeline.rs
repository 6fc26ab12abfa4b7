use crate::convert::{self, SchemaError, SkippedItems, WalkOptions};
use crate::export::{self, LoadError};
use crate::output::csv_file::{self, CsvError, CsvOptions};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

const CSV_EXTENSION: &str = "csv";
const STDOUT_MARKER: &str = "-";

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input file not found: {0}")]
    InputNotFound(String),

    #[error("output path is the same as the input: {0}")]
    OutputIsInput(String),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Csv(#[from] CsvError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

impl OutputTarget {
    /// `-` means stdout; no path means the input path with a `.csv` extension.
    pub fn resolve(input: &Path, output: Option<&Path>) -> Self {
        match output {
            Some(path) if path.as_os_str() == STDOUT_MARKER => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(path.to_path_buf()),
            None => OutputTarget::File(input.with_extension(CSV_EXTENSION)),
        }
    }

    pub fn display(&self) -> String {
        match self {
            OutputTarget::File(path) => path.display().to_string(),
            OutputTarget::Stdout => STDOUT_MARKER.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConvertRequest {
    pub input: PathBuf,
    pub output: OutputTarget,
    pub walk: WalkOptions,
    pub csv: CsvOptions,
    pub overwrite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSummary {
    pub records: usize,
    pub skipped: SkippedItems,
}

pub fn convert_file(request: &ConvertRequest) -> Result<ConvertSummary, ConvertError> {
    if !request.input.exists() {
        return Err(ConvertError::InputNotFound(
            request.input.display().to_string(),
        ));
    }
    if let OutputTarget::File(path) = &request.output {
        if same_file(&request.input, path) {
            return Err(ConvertError::OutputIsInput(path.display().to_string()));
        }
    }

    let document = export::load_export(&request.input)?;
    let records = convert::walk(&document, request.walk)?;
    let skipped = records.skipped();

    let written = match &request.output {
        OutputTarget::File(path) => {
            csv_file::write_csv_file_atomic(path, records, request.csv, request.overwrite)?
        }
        OutputTarget::Stdout => {
            let stdout = std::io::stdout();
            csv_file::write_records(stdout.lock(), records, request.csv)?
        }
    };

    info!(
        records = written,
        skipped = skipped.total(),
        skipped_archived = skipped.archived,
        skipped_trashed = skipped.trashed,
        skipped_unknown = skipped.unknown,
        "conversion finished"
    );

    Ok(ConvertSummary {
        records: written,
        skipped,
    })
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
