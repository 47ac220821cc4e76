// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! The content hash of a single block.

use core::ops::AddAssign;

use crate::hash::block::BLOCK_HASH_MODULO;

/// Hasher which accumulates the bytes of one block as a base-256 number
/// modulo [`BLOCK_HASH_MODULO`] (`2^31 - 1`).
///
/// The generator resets it at every block boundary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BlockHasher {
    /// Current hash value (always `< BLOCK_HASH_MODULO`).
    value: u32,
}

impl BlockHasher {
    /// Creates a new [`BlockHasher`] with the initial value.
    pub fn new() -> Self {
        BlockHasher { value: 0 }
    }

    /// Updates the hash value by processing a byte.
    #[inline]
    pub fn update_by_byte(&mut self, ch: u8) -> &mut Self {
        self.value = ((u64::from(self.value) * 256 + u64::from(ch))
            % u64::from(BLOCK_HASH_MODULO)) as u32;
        self
    }

    /// Updates the hash value by processing a slice of [`u8`].
    pub fn update(&mut self, buf: &[u8]) -> &mut Self {
        for &ch in buf.iter() {
            self.update_by_byte(ch);
        }
        self
    }

    /// Returns the current hash value.
    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Resets the hash to the initial state and returns the old value.
    #[inline]
    pub fn take(&mut self) -> u32 {
        core::mem::take(&mut self.value)
    }
}

impl AddAssign<&[u8]> for BlockHasher {
    /// Updates the hash value by processing a slice of [`u8`].
    #[inline(always)]
    fn add_assign(&mut self, buffer: &[u8]) {
        self.update(buffer);
    }
}

impl AddAssign<u8> for BlockHasher {
    /// Updates the hash value by processing a byte.
    #[inline(always)]
    fn add_assign(&mut self, byte: u8) {
        self.update_by_byte(byte);
    }
}
