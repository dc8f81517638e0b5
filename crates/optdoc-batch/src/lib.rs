//! optdoc-batch: Batch conversion of option record files
//!
//! Loads a JSON array of option records, renders every description in
//! parallel and writes the transformed array back out.
//!
//! The batch is all-or-nothing: a single failing record aborts the run
//! and the output file is left untouched.

use optdoc_core::{MarkdownOptions, OptionRecord, TransformError, transform, type_name};
use rayon::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Errors that can occur during a batch run
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("expected a JSON array of option records, found {found}")]
    NotArray { found: &'static str },

    #[error("record {index} is not a JSON object, found {found}")]
    RecordNotObject { index: usize, found: &'static str },

    #[error("record {index}: {source}")]
    Record {
        index: usize,
        source: TransformError,
    },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to serialize records: {0}")]
    Serialize(serde_json::Error),
}

/// Result type for batch operations
pub type Result<T> = std::result::Result<T, BatchError>;

/// Options for a batch run
#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Markdown extensions used by both renderers
    pub markdown: MarkdownOptions,
    /// Number of parallel jobs (None = rayon default, one per CPU)
    pub jobs: Option<usize>,
    /// Pretty-print the output JSON
    pub pretty: bool,
}

/// Result of a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of records written
    pub records: usize,
}

/// Load option records from a JSON file
///
/// Fails before any record is transformed if the file cannot be read,
/// is not valid JSON, is not an array, or holds a non-object element.
pub fn load_records(path: &Path) -> Result<Vec<OptionRecord>> {
    let content = fs::read_to_string(path).map_err(|source| BatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| BatchError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    parse_records(value)
}

/// Split a JSON value into option records
pub fn parse_records(value: Value) -> Result<Vec<OptionRecord>> {
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(BatchError::NotArray {
                found: type_name(&other),
            });
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(OptionRecord::new(fields)),
            other => Err(BatchError::RecordNotObject {
                index,
                found: type_name(&other),
            }),
        })
        .collect()
}

/// Transform all records in parallel
///
/// The output keeps the input order. The first failure observed aborts
/// the whole batch.
pub fn transform_records(
    records: Vec<OptionRecord>,
    options: &BatchOptions,
) -> Result<Vec<OptionRecord>> {
    let convert_all = || {
        records
            .into_par_iter()
            .enumerate()
            .map(|(index, record)| {
                trace!(index, "transforming record");
                transform(record, &options.markdown)
                    .map_err(|source| BatchError::Record { index, source })
            })
            .collect::<Result<Vec<_>>>()
    };

    match options.jobs {
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build()?;
            debug!(threads = pool.current_num_threads(), "using dedicated thread pool");
            pool.install(convert_all)
        }
        None => convert_all(),
    }
}

/// Write option records as a JSON array
///
/// Parent directories are created as needed. The file is written in
/// place, without an atomic rename.
pub fn write_records(path: &Path, records: &[OptionRecord], pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(records)
    } else {
        serde_json::to_string(records)
    }
    .map_err(BatchError::Serialize)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| BatchError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, json).map_err(|source| BatchError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Convert an input file of option records into an output file
pub fn run(input: &Path, output: &Path, options: &BatchOptions) -> Result<BatchSummary> {
    let records = load_records(input)?;
    debug!(count = records.len(), input = %input.display(), "loaded records");

    let records = transform_records(records, options)?;
    debug!(count = records.len(), "transformed records");

    write_records(output, &records, options.pretty)?;
    debug!(output = %output.display(), "wrote records");

    Ok(BatchSummary {
        records: records.len(),
    })
}
