// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

#![cfg(feature = "easy-functions")]

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::generate::{FactorError, Generator};
use crate::hash::UniformFuzzyHash;
use crate::macros::{invariant, optionally_unsafe};




/// The error type describing either a generator error or an I/O error.
///
/// This type contains either:
/// *   A factor error ([`FactorError`]) or
/// *   An I/O error ([`std::io::Error`]).
#[derive(Debug, Error)]
pub enum GeneratorOrIOError {
    /// An error caused by the fuzzy hash generator.
    #[error(transparent)]
    GeneratorError(#[from] FactorError),
    /// An error caused by an internal I/O operation.
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}


/// Constant temporary buffer size for "easy" functions.
const BUFFER_SIZE: usize = 32768;

/// Feeds everything from a reader stream to a generator.
#[inline]
fn hash_stream_common<R: Read>(
    generator: &mut Generator,
    reader: &mut R,
) -> Result<UniformFuzzyHash, GeneratorOrIOError>
{
    let mut buffer = [0u8; BUFFER_SIZE];
    loop {
        let len = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(len) => len,
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()), // grcov-excl-br-line:IO
        };
        optionally_unsafe! {
            invariant!(len <= buffer.len());
        }
        generator.update(&buffer[0..len]);
    }
    Ok(generator.finalize())
}


/// Generates a fuzzy hash from a given reader stream.
///
/// # Example
///
/// ```
/// use std::fs::File;
///
/// fn main() -> Result<(), ufh::GeneratorOrIOError> {
///     let mut stream = File::open("data/samples/hello.txt")?;
///     let fuzzy_hash = ufh::hash_stream(&mut stream, 11)?;
///     assert_eq!(fuzzy_hash.to_string(), "11:829382750.11/6562058.3");
///     Ok(())
/// }
/// ```
pub fn hash_stream<R: Read>(reader: &mut R, factor: u32)
    -> Result<UniformFuzzyHash, GeneratorOrIOError>
{
    let mut generator = Generator::new(factor)?;
    hash_stream_common(&mut generator, reader)
}

/// Generates a fuzzy hash from a given file.
///
/// # Example
///
/// ```
/// fn main() -> Result<(), ufh::GeneratorOrIOError> {
///     let fuzzy_hash = ufh::hash_file("data/samples/hello.txt", 11)?;
///     assert_eq!(fuzzy_hash.to_string(), "11:829382750.11/6562058.3");
///     Ok(())
/// }
/// ```
pub fn hash_file<P: AsRef<Path>>(path: P, factor: u32)
    -> Result<UniformFuzzyHash, GeneratorOrIOError>
{
    // Validate the factor before touching the file.
    let mut generator = Generator::new(factor)?;
    let mut file = File::open(path)?;
    hash_stream_common(&mut generator, &mut file)
}
