// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

#![cfg(feature = "easy-functions")]

use crate::generate::{FactorError, Generator};
use crate::hash::UniformFuzzyHash;




/// Generates a fuzzy hash from a given buffer.
///
/// # Example
///
/// ```
/// assert_eq!(
///     ufh::hash_buf(b"Hello, World!\n", 11).unwrap().to_string(),
///     "11:829382750.11/6562058.3"
/// );
/// assert!(ufh::hash_buf(b"Hello, World!\n", 4).is_err());
/// ```
pub fn hash_buf(buffer: &[u8], factor: u32) -> Result<UniformFuzzyHash, FactorError> {
    let mut generator = Generator::new(factor)?;
    generator.update(buffer);
    Ok(generator.finalize())
}
