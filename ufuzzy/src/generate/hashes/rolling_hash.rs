// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! The window hash deciding where content-defined blocks end.

use core::ops::AddAssign;

use crate::generate::{validate_factor, FactorError};
use crate::macros::{invariant, optionally_unsafe};
use crate::utils::{self, MAX_WINDOW_SIZE};

// grcov-excl-br-start:STRUCT_MEMBER

/// Hasher which computes a polynomial rolling hash over the last
/// [`window_size()`](Self::window_size()) bytes, modulo the factor.
///
/// The bytes are interpreted as digits of a base-256 number.  Once the
/// window is full, the contribution of the fading byte is removed by
/// subtracting it multiplied by `256^window_size mod factor` (the
/// *shifter*), so that the hash only depends on the window contents.
///
/// Unlike the block hash, this hash is never reset between blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollingHash {
    /// The modulus (the factor of the fuzzy hash).
    factor: u32,

    /// `256^window_size mod factor`.
    shifter: u32,

    /// The number of bytes in a full window.
    window_size: usize,

    /// Number of bytes currently in the window (saturates at
    /// [`window_size`](Self::window_size)).
    filled: usize,

    /// Ring buffer index of the oldest byte (and the next slot to write).
    index: usize,

    /// Current hash value (always `< factor`).
    value: u32,

    /// The last `window_size` bytes of the processed data.
    window: [u8; MAX_WINDOW_SIZE],
}

// grcov-excl-br-stop

impl RollingHash {
    /// Creates a new [`RollingHash`] for the given factor.
    pub fn new(factor: u32) -> Result<Self, FactorError> {
        validate_factor(factor)?;
        Ok(Self::new_unchecked(factor))
    }

    /// Creates a new [`RollingHash`] for an already validated factor.
    pub(crate) fn new_unchecked(factor: u32) -> Self {
        let window_size = utils::window_size_for(factor);
        RollingHash {
            factor,
            shifter: utils::shift_factor(window_size, factor),
            window_size,
            filled: 0,
            index: 0,
            value: 0,
            window: [0; MAX_WINDOW_SIZE],
        }
    }

    /// The factor (modulus) of this hash.
    #[inline]
    pub fn factor(&self) -> u32 {
        self.factor
    }

    /// The number of bytes covered by a full window.
    ///
    /// This is the byte length of the factor plus 5.
    #[inline]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Returns whether the window has seen at least
    /// [`window_size()`](Self::window_size()) bytes.
    #[inline]
    pub fn is_window_full(&self) -> bool {
        self.filled == self.window_size
    }

    /// Updates the hash value by processing a byte.
    #[inline]
    pub fn update_by_byte(&mut self, ch: u8) -> &mut Self {
        optionally_unsafe! {
            invariant!(self.index < self.window_size);
            invariant!(self.window_size <= MAX_WINDOW_SIZE);
        }
        let factor = u64::from(self.factor);
        let shifted = (u64::from(self.value) * 256 + u64::from(ch)) % factor;
        if self.filled < self.window_size {
            self.value = shifted as u32;
            self.filled += 1;
        } else {
            let fading = u64::from(self.window[self.index]); // grcov-excl-br-line:ARRAY
            let removed = fading * u64::from(self.shifter) % factor;
            self.value = utils::sub_mod(shifted, removed, factor) as u32;
        }
        self.window[self.index] = ch; // grcov-excl-br-line:ARRAY
        self.index += 1;
        if self.index == self.window_size {
            self.index = 0;
        }
        self
    }

    /// Updates the hash value by processing an iterator of [`u8`].
    pub fn update_by_iter(&mut self, iter: impl Iterator<Item = u8>) -> &mut Self {
        for ch in iter {
            self.update_by_byte(ch);
        }
        self
    }

    /// Updates the hash value by processing a slice of [`u8`].
    pub fn update(&mut self, buf: &[u8]) -> &mut Self {
        for &ch in buf.iter() {
            self.update_by_byte(ch);
        }
        self
    }

    /// Returns the current hash value (in `0..factor`).
    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Returns whether the current position closes a block.
    ///
    /// A block closes when the window is full and the hash equals
    /// `factor - 1`.
    #[inline]
    pub fn is_trigger(&self) -> bool {
        self.is_window_full() && self.value == self.factor - 1
    }
}

impl AddAssign<&[u8]> for RollingHash {
    /// Updates the hash value by processing a slice of [`u8`].
    #[inline(always)]
    fn add_assign(&mut self, buffer: &[u8]) {
        self.update(buffer);
    }
}

impl<const N: usize> AddAssign<&[u8; N]> for RollingHash {
    /// Updates the hash value by processing an array of [`u8`].
    #[inline(always)]
    fn add_assign(&mut self, buffer: &[u8; N]) {
        self.update(&buffer[..]);
    }
}

impl AddAssign<u8> for RollingHash {
    /// Updates the hash value by processing a byte.
    #[inline(always)]
    fn add_assign(&mut self, byte: u8) {
        self.update_by_byte(byte);
    }
}
