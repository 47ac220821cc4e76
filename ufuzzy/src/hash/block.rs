// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! Content-defined blocks of a uniform fuzzy hash.

use crate::macros::{invariant, optionally_unsafe};

/// The modulus of the block hash (`2^31 - 1`).
///
/// Every valid block hash is in `0..BLOCK_HASH_MODULO`.
pub const BLOCK_HASH_MODULO: u32 = 0x7fff_ffff;

// grcov-excl-br-start:STRUCT_MEMBER

/// A content-defined block: its content hash and the byte range it covers.
///
/// # Equality
///
/// Two blocks are equal when both their hash and their size are equal.
/// The position is ignored (by [`Hash`](core::hash::Hash) too), so a
/// block set is looked up by content wherever a block appears.
#[derive(Debug, Clone, Copy)]
pub struct Block {
    /// The block hash (in `0..BLOCK_HASH_MODULO`).
    hash: u32,

    /// Offset of the first byte of this block.
    start_offset: u64,

    /// Offset of the last byte of this block (inclusive).
    end_offset: u64,
}

// grcov-excl-br-stop

impl Block {
    /// Creates a block without checking the arguments.
    ///
    /// `hash` must be in `0..BLOCK_HASH_MODULO` and
    /// `start_offset <= end_offset` must hold.
    #[inline]
    pub(crate) fn new_unchecked(hash: u32, start_offset: u64, end_offset: u64) -> Self {
        optionally_unsafe! {
            invariant!(hash < BLOCK_HASH_MODULO);
            invariant!(start_offset <= end_offset);
        }
        Block {
            hash,
            start_offset,
            end_offset,
        }
    }

    /// Creates a block from its hash, the offset of its first byte and its size.
    ///
    /// Returns [`None`] if the hash is out of range, the size is zero or
    /// the offset right after the block does not fit in a [`u64`].
    pub fn new(hash: u32, start_offset: u64, size: u64) -> Option<Self> {
        if hash >= BLOCK_HASH_MODULO || size == 0 {
            return None;
        }
        let next_start = start_offset.checked_add(size)?;
        Some(Self::new_unchecked(hash, start_offset, next_start - 1))
    }

    /// The block hash.
    #[inline]
    pub fn hash(&self) -> u32 {
        self.hash
    }

    /// Offset of the first byte of this block.
    #[inline]
    pub fn start_offset(&self) -> u64 {
        self.start_offset
    }

    /// Offset of the last byte of this block (inclusive).
    #[inline]
    pub fn end_offset(&self) -> u64 {
        self.end_offset
    }

    /// Number of bytes in this block (at least 1).
    #[inline]
    pub fn size(&self) -> u64 {
        self.end_offset - self.start_offset + 1
    }

    /// Returns whether the internal state is consistent.
    pub fn is_valid(&self) -> bool {
        self.hash < BLOCK_HASH_MODULO
            && self.start_offset <= self.end_offset
            && self.end_offset != u64::MAX
    }
}

impl PartialEq for Block {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.size() == other.size()
    }
}

impl Eq for Block {}

impl core::hash::Hash for Block {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.hash);
        state.write_u64(self.size());
    }
}

mod tests;
