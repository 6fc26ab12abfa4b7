//! CSV output.
//!
//! Output files hold plaintext passwords: they are created owner-only
//! (0600) and go through write-temp, fsync, atomic rename so a failed run
//! never leaves a half-written file behind.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::convert::Record;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

pub const HEADER: [&str; 6] = ["Title", "URL", "Username", "Password", "Notes", "OTPAuth"];
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub bom: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { bom: true }
    }
}

#[derive(Debug, Error)]
pub enum CsvError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("output file already exists: {0} (use `--force` to overwrite)")]
    AlreadyExists(String),
}

/// Writes the header and every record; returns the number of records.
pub fn write_records<W, I>(mut out: W, records: I, options: CsvOptions) -> Result<usize, CsvError>
where
    W: Write,
    I: IntoIterator<Item = Record>,
{
    if options.bom {
        out.write_all(UTF8_BOM)?;
    }

    // Headers are written by hand so an empty export still gets them.
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(out);
    writer.write_record(HEADER)?;

    let mut count = 0usize;
    for record in records {
        writer.serialize(&record)?;
        count += 1;
    }

    writer.flush()?;
    Ok(count)
}

pub fn write_csv_file_atomic<I>(
    path: &Path,
    records: I,
    options: CsvOptions,
    overwrite: bool,
) -> Result<usize, CsvError>
where
    I: IntoIterator<Item = Record>,
{
    if !overwrite && path.exists() {
        return Err(CsvError::AlreadyExists(path.display().to_string()));
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;

    #[cfg(unix)]
    tmp.as_file()
        .set_permissions(fs::Permissions::from_mode(0o600))?;

    let count = {
        let mut out = BufWriter::new(tmp.as_file_mut());
        let count = write_records(&mut out, records, options)?;
        out.flush()?;
        count
    };
    tmp.as_file_mut().sync_all()?;

    if overwrite {
        tmp.persist(path).map_err(|err| CsvError::Io(err.error))?;
    } else {
        tmp.persist_noclobber(path).map_err(|err| {
            if err.error.kind() == std::io::ErrorKind::AlreadyExists {
                CsvError::AlreadyExists(path.display().to_string())
            } else {
                CsvError::Io(err.error)
            }
        })?;
    }

    fsync_dir(dir)?;
    Ok(count)
}

fn fsync_dir(dir: &Path) -> Result<(), CsvError> {
    #[cfg(unix)]
    {
        let file = File::open(dir)?;
        file.sync_all()?;
    }
    #[cfg(not(unix))]
    let _ = dir;
    Ok(())
}
