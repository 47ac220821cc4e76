// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! Numeric helpers for the rolling window arithmetic.

/// The number of bytes appended to [`byte_length()`] of the factor
/// to get the rolling window size.
pub(crate) const WINDOW_SIZE_EXTRA: usize = 5;

/// The largest window size any valid factor can produce.
///
/// A [`u32`] factor needs at most 4 bytes.
pub(crate) const MAX_WINDOW_SIZE: usize = 4 + WINDOW_SIZE_EXTRA;

/// Returns the minimum number of bytes needed to represent `value`.
///
/// This is `floor(log2(value)) / 8 + 1`.  Zero is treated as a value
/// that needs a single byte.
#[inline]
pub(crate) fn byte_length(value: u32) -> usize {
    if value == 0 {
        return 1;
    }
    (value.ilog2() / 8 + 1) as usize
}

/// Returns the rolling window size for the given factor.
#[inline]
pub(crate) fn window_size_for(factor: u32) -> usize {
    byte_length(factor) + WINDOW_SIZE_EXTRA
}

/// Computes `256^exponent mod modulus` without overflowing.
///
/// The power is built one multiplication at a time, reducing after
/// each step.
pub(crate) fn shift_factor(exponent: usize, modulus: u32) -> u32 {
    debug_assert!(modulus != 0);
    let modulus = u64::from(modulus);
    let mut shifter = 1u64 % modulus;
    for _ in 0..exponent {
        shifter = (shifter << 8) % modulus;
    }
    shifter as u32
}

/// Computes `(lhs - rhs) mod modulus` as a true (non-negative) modulo.
///
/// Both operands must already be reduced modulo `modulus`.
#[inline(always)]
pub(crate) fn sub_mod(lhs: u64, rhs: u64, modulus: u64) -> u64 {
    debug_assert!(lhs < modulus && rhs < modulus);
    if lhs >= rhs {
        lhs - rhs
    } else {
        lhs + modulus - rhs
    }
}

mod tests;
