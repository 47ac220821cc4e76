// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! Line-oriented collections of named fuzzy hashes.
//!
//! ```text
//! # comment lines and empty lines are skipped
//! hello.txt<TAB>11:829382750.11/6562058.3
//! repeated.txt<TAB>11|~D~J~G~GC,~F;A,~A;A,~A;A,~A;A,~A
//! ```
//!
//! Each entry is a name, a tab and a fuzzy hash in either form.

use std::io::{BufRead, Write};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

use crate::compare::metrics::SimilarityMetric;
use crate::compare::FactorMismatchError;
use crate::hash::parser_state::ParseError;
use crate::hash::{TextFormat, UniformFuzzyHash};


#[cfg(test)]
mod tests;


/// The separator between the name and the fuzzy hash.
pub const NAME_SEPARATOR: char = '\t';

/// Lines starting with this character are ignored.
pub const IGNORE_MARK: char = '#';

/// A fuzzy hash with a name (usually a file name).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedFuzzyHash {
    /// The name.
    pub name: String,
    /// The fuzzy hash.
    pub hash: UniformFuzzyHash,
}

impl NamedFuzzyHash {
    /// Creates a new named fuzzy hash.
    pub fn new(name: impl Into<String>, hash: UniformFuzzyHash) -> Self {
        Self { name: name.into(), hash }
    }

    /// Returns whether the name can be written to a collection.
    ///
    /// A name must not contain the name separator or a line break.
    pub fn is_name_valid(&self) -> bool {
        !self.name.contains(&[NAME_SEPARATOR, '\r', '\n'][..])
    }
}

/// The way to handle malformed lines while loading a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMode {
    /// Fail on the first malformed line.
    #[default]
    Strict,
    /// Skip malformed lines (with a warning).
    Lenient,
}

/// The error type for collection operations.
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The fuzzy hash on a line is malformed.
    #[error("line {line}: {source}")]
    Parse {
        /// The line number.
        line: usize,
        /// The parse error.
        source: ParseError,
    },
    /// A line has no name separator.
    #[error("line {line}: name separator is not found")]
    NameSeparatorNotFound {
        /// The line number.
        line: usize,
    },
    /// A name cannot be written.
    #[error("invalid name {0:?} (must not contain a tab or a line break)")]
    InvalidName(String),
    /// An I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CollectionError {
    /// The line number which caused the error, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            CollectionError::Parse { line, .. } => Some(*line),
            CollectionError::NameSeparatorNotFound { line } => Some(*line),
            CollectionError::InvalidName(_) | CollectionError::Io(_) => None,
        }
    }
}

/// Parses one line (`line_no` is 1-based).
///
/// Returns [`None`] if the line is to be skipped.
fn parse_line(line_no: usize, line: &str) -> Result<Option<NamedFuzzyHash>, CollectionError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() || line.starts_with(IGNORE_MARK) {
        return Ok(None);
    }
    let (name, text) = line
        .split_once(NAME_SEPARATOR)
        .ok_or(CollectionError::NameSeparatorNotFound { line: line_no })?;
    let hash = UniformFuzzyHash::from_str_any(text).map_err(|source| CollectionError::Parse {
        line: line_no,
        source,
    })?;
    Ok(Some(NamedFuzzyHash::new(name, hash)))
}

/// Handles a result of [`parse_line()`] depending on the mode.
fn accept_line(
    entries: &mut Vec<NamedFuzzyHash>,
    result: Result<Option<NamedFuzzyHash>, CollectionError>,
    mode: LoadMode,
) -> Result<(), CollectionError> {
    match (result, mode) {
        (Ok(Some(entry)), _) => entries.push(entry),
        (Ok(None), _) => {}
        (Err(err), LoadMode::Strict) => return Err(err),
        (Err(err), LoadMode::Lenient) => {
            warn!(line = err.line(), error = %err, "skipping malformed line");
        }
    }
    Ok(())
}

/// Parses a collection from a string.
///
/// # Example
///
/// ```
/// use ufh::collection::{parse_collection, LoadMode};
///
/// let text = "# name\thash\nhello.txt\t11:829382750.11/6562058.3\n";
/// let entries = parse_collection(text, LoadMode::Strict).unwrap();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].name, "hello.txt");
/// ```
pub fn parse_collection(text: &str, mode: LoadMode) -> Result<Vec<NamedFuzzyHash>, CollectionError> {
    let mut entries = Vec::new();
    for (index, line) in text.lines().enumerate() {
        accept_line(&mut entries, parse_line(index + 1, line), mode)?;
    }
    debug!(entries = entries.len(), "parsed fuzzy hash collection");
    Ok(entries)
}

/// Reads a collection from a buffered reader.
///
/// I/O errors are never skipped, even in the lenient mode.
pub fn read_collection<R: BufRead>(
    reader: R,
    mode: LoadMode,
) -> Result<Vec<NamedFuzzyHash>, CollectionError> {
    let mut entries = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        accept_line(&mut entries, parse_line(index + 1, &line), mode)?;
    }
    debug!(entries = entries.len(), "read fuzzy hash collection");
    Ok(entries)
}

/// Writes a collection (one entry per line) in the given format.
///
/// All names are checked before writing anything.
pub fn write_collection<W: Write>(
    writer: &mut W,
    entries: &[NamedFuzzyHash],
    format: TextFormat,
) -> Result<(), CollectionError> {
    if let Some(entry) = entries.iter().find(|entry| !entry.is_name_valid()) {
        return Err(CollectionError::InvalidName(entry.name.clone()));
    }
    for entry in entries {
        writeln!(
            writer,
            "{}{}{}",
            entry.name,
            NAME_SEPARATOR,
            entry.hash.to_string_in(format)
        )?;
    }
    Ok(())
}

/// Computes the given metric for all pairs of entries.
///
/// The result is an `n * n` row-major matrix where the element at
/// `i * n + j` is the metric of the entry `i` against the entry `j`.
/// With the `parallel` feature, pairs are computed on the rayon thread pool.
pub fn similarity_matrix(
    entries: &[NamedFuzzyHash],
    metric: SimilarityMetric,
) -> Result<Vec<f64>, FactorMismatchError> {
    let n = entries.len();
    let cell = |index: usize| {
        let (i, j) = (index / n, index % n);
        metric.compute(&entries[i].hash, &entries[j].hash) // grcov-excl-br-line:ARRAY
    };
    cfg_if::cfg_if! {
        if #[cfg(feature = "parallel")] {
            (0..n * n).into_par_iter().map(cell).collect()
        }
        else {
            (0..n * n).map(cell).collect()
        }
    }
}
