use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::error::{CatalogError, Result};
use crate::model::CourseRecord;
use crate::settings::OutputFormat;

const JSON_INDENT: &[u8] = b"    ";

/// Outcome of [`save_catalog`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved {
    Written { path: PathBuf, count: usize },
    /// Nothing to write; no file was created.
    Empty,
}

pub fn save_catalog(catalog: &[CourseRecord], path: &Path, format: OutputFormat) -> Result<Saved> {
    if catalog.is_empty() {
        return Ok(Saved::Empty);
    }

    match format {
        OutputFormat::Json => write_json(path, catalog)?,
        OutputFormat::Csv => write_csv(path, catalog)?,
    }
    info!(path = %path.display(), count = catalog.len(), ?format, "catalog written");

    Ok(Saved::Written {
        path: path.to_path_buf(),
        count: catalog.len(),
    })
}

/// Pretty-print with a four-space indent; non-ASCII is written as-is.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    value.serialize(&mut ser)?;
    buf.push(b'\n');
    Ok(buf)
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let bytes = to_pretty_json(value).map_err(|source| CatalogError::Encode {
        path: path.to_path_buf(),
        source,
    })?;

    let write_err = |source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut out = create(path)?;
    out.write_all(&bytes).map_err(write_err)?;
    out.flush().map_err(write_err)
}

/// Header `id,title,description`, then one row per record.
pub fn write_csv(path: &Path, records: &[CourseRecord]) -> Result<()> {
    let csv_err = |source| CatalogError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut wtr = csv::Writer::from_writer(create(path)?);
    for record in records {
        wtr.serialize(record).map_err(csv_err)?;
    }
    wtr.flush().map_err(|source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let write_err = |source| CatalogError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }
    File::create(path).map(BufWriter::new).map_err(write_err)
}
