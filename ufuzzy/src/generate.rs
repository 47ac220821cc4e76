// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! Uniform fuzzy hash generator.

use core::ops::AddAssign;

use thiserror::Error;
use tracing::debug;

use crate::hash::block::Block;
use crate::hash::UniformFuzzyHash;

pub(crate) mod hashes;

pub use hashes::block_hash::BlockHasher;
pub use hashes::rolling_hash::RollingHash;

/// The error type representing an invalid factor.
///
/// A factor must be odd and greater than 2.  An even factor shares
/// divisors with 256 and breaks the rolling property of the window hash.
///
/// # Compatibility Note
///
/// Factors which are merely "not a power of two" are not accepted.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FactorError {
    /// The factor is 2 or less.
    #[error("factor {0} is too small (must be greater than 2)")]
    TooSmall(u32),
    /// The factor is even.
    #[error("factor {0} is not odd")]
    NotOdd(u32),
}

/// Checks whether `factor` can be used to generate a fuzzy hash.
pub(crate) fn validate_factor(factor: u32) -> Result<(), FactorError> {
    if factor <= 2 {
        return Err(FactorError::TooSmall(factor));
    }
    if factor % 2 == 0 {
        return Err(FactorError::NotOdd(factor));
    }
    Ok(())
}

/// Returns whether `factor` can be used to generate a fuzzy hash.
#[inline]
pub fn is_valid_factor(factor: u32) -> bool {
    validate_factor(factor).is_ok()
}

// grcov-excl-br-start:STRUCT_MEMBER

/// Uniform fuzzy hash generator.
///
/// The generator splits the input into content-defined blocks in a single
/// pass.  For every byte, it updates:
///
/// 1.  the [window hash](RollingHash) over the last few bytes (never reset)
///     and
/// 2.  the [block hash](BlockHasher) over all bytes since the last boundary.
///
/// A block ends when the window is full and the window hash equals
/// `factor - 1`.  The last byte of the input always ends a block, which
/// [`finalize()`](Self::finalize()) takes care of.
///
/// Since boundaries depend only on local content, the result does not
/// depend on how the input is split across [`update()`](Self::update())
/// calls.
///
/// # Example
///
/// ```
/// let mut generator = ufh::Generator::new(11).unwrap();
/// generator.update(b"Hello, ");
/// generator.update(b"World!\n");
/// let hash = generator.finalize();
/// assert_eq!(hash.to_string(), "11:829382750.11/6562058.3");
/// ```
#[derive(Debug, Clone)]
pub struct Generator {
    /// The window hash deciding block boundaries.
    rolling: RollingHash,

    /// The content hash of the current (unfinished) block.
    block_hash: BlockHasher,

    /// Number of bytes processed so far.
    input_size: u64,

    /// Offset of the first byte of the current block.
    block_start: u64,

    /// Blocks closed so far.
    blocks: Vec<Block>,
}

// grcov-excl-br-stop

impl Generator {
    /// Creates a new [`Generator`] for the given factor.
    ///
    /// The factor approximates the mean block size in bytes.
    pub fn new(factor: u32) -> Result<Self, FactorError> {
        validate_factor(factor)?;
        Ok(Generator {
            rolling: RollingHash::new_unchecked(factor),
            block_hash: BlockHasher::new(),
            input_size: 0,
            block_start: 0,
            blocks: Vec::new(),
        })
    }

    /// The factor this generator was created with.
    #[inline]
    pub fn factor(&self) -> u32 {
        self.rolling.factor()
    }

    /// Number of bytes processed so far.
    #[inline]
    pub fn input_size(&self) -> u64 {
        self.input_size
    }

    /// Number of blocks closed so far (the pending block is not counted).
    #[inline]
    pub fn closed_block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Resets the generator to the initial state (keeping the factor).
    pub fn reset(&mut self) {
        self.rolling = RollingHash::new_unchecked(self.factor());
        self.block_hash = BlockHasher::new();
        self.input_size = 0;
        self.block_start = 0;
        self.blocks.clear();
    }

    /// Closes the current block at `end_offset`.
    #[inline(always)]
    fn close_block(&mut self, end_offset: u64) {
        self.blocks.push(Block::new_unchecked(
            self.block_hash.take(),
            self.block_start,
            end_offset,
        ));
        self.block_start = end_offset + 1;
    }

    /// Processes a byte and updates the internal state.
    #[inline]
    pub fn update_by_byte(&mut self, ch: u8) -> &mut Self {
        self.rolling.update_by_byte(ch);
        self.block_hash.update_by_byte(ch);
        let offset = self.input_size;
        self.input_size += 1;
        if self.rolling.is_trigger() {
            self.close_block(offset);
        }
        self
    }

    /// Processes data provided as an iterator and updates the internal state.
    pub fn update_by_iter(&mut self, iter: impl Iterator<Item = u8>) -> &mut Self {
        for ch in iter {
            self.update_by_byte(ch);
        }
        self
    }

    /// Processes data and updates the internal state.
    pub fn update(&mut self, buffer: &[u8]) -> &mut Self {
        for &ch in buffer.iter() {
            self.update_by_byte(ch);
        }
        self
    }

    /// Retrieves the resulting fuzzy hash.
    ///
    /// If bytes remain after the last boundary, they form the final block.
    /// The generator itself is left untouched and may keep processing data.
    pub fn finalize(&self) -> UniformFuzzyHash {
        let mut blocks = Vec::with_capacity(self.blocks.len() + 1);
        blocks.extend_from_slice(&self.blocks);
        if self.block_start < self.input_size {
            blocks.push(Block::new_unchecked(
                self.block_hash.value(),
                self.block_start,
                self.input_size - 1,
            ));
        }
        debug!(
            factor = self.factor(),
            data_size = self.input_size,
            blocks = blocks.len(),
            "generated uniform fuzzy hash"
        );
        UniformFuzzyHash::from_blocks_unchecked(self.factor(), self.input_size, blocks)
    }
}

impl AddAssign<&[u8]> for Generator {
    /// Updates the hash value by processing a slice of [`u8`].
    #[inline(always)]
    fn add_assign(&mut self, buffer: &[u8]) {
        self.update(buffer);
    }
}

impl<const N: usize> AddAssign<&[u8; N]> for Generator {
    /// Updates the hash value by processing an array of [`u8`].
    #[inline(always)]
    fn add_assign(&mut self, buffer: &[u8; N]) {
        self.update(&buffer[..]);
    }
}

impl AddAssign<u8> for Generator {
    /// Updates the hash value by processing a byte.
    #[inline(always)]
    fn add_assign(&mut self, byte: u8) {
        self.update_by_byte(byte);
    }
}
