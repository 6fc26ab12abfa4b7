//! Reading 1PUX containers.
//!
//! A `.1pux` file is a ZIP archive holding `export.data` (the JSON document)
//! plus attachment files. A bare `export.data` file is accepted as well.
//! Raw bytes are wiped once parsed since they contain plaintext secrets.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use thiserror::Error;
use tracing::debug;
use zeroize::Zeroizing;

use super::ExportDocument;

const ZIP_SIGNATURE: &[u8; 4] = b"PK\x03\x04";
const EXPORT_DATA_NAME: &str = "export.data";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("input is not a readable 1PUX archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("no export.data found in 1PUX archive")]
    MissingExportData,

    #[error("export.data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_export(path: &Path) -> Result<ExportDocument, LoadError> {
    let io_err = |source| LoadError::Io {
        path: path.display().to_string(),
        source,
    };

    let mut file = File::open(path).map_err(io_err)?;
    let mut bytes = Zeroizing::new(Vec::new());
    file.read_to_end(&mut bytes).map_err(io_err)?;

    parse_export(&bytes)
}

/// Parses either a ZIP container or a raw `export.data` document.
pub fn parse_export(bytes: &[u8]) -> Result<ExportDocument, LoadError> {
    if bytes.starts_with(ZIP_SIGNATURE) {
        debug!("input looks like a 1PUX archive");
        let data = read_export_data(bytes)?;
        return Ok(serde_json::from_slice(&data)?);
    }

    debug!("input treated as a raw export.data document");
    Ok(serde_json::from_slice(bytes)?)
}

fn read_export_data(bytes: &[u8]) -> Result<Zeroizing<Vec<u8>>, LoadError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name();
        if name != EXPORT_DATA_NAME && !name.ends_with("/export.data") {
            continue;
        }

        debug!(entry = name, "reading export data");
        let mut data = Zeroizing::new(Vec::with_capacity(entry.size() as usize));
        entry
            .read_to_end(&mut data)
            .map_err(|source| LoadError::Io {
                path: EXPORT_DATA_NAME.to_string(),
                source,
            })?;
        return Ok(data);
    }

    Err(LoadError::MissingExportData)
}
