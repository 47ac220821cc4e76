// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! Internal macros (mainly to share safe/unsafe code).

/// "Optionally" unsafe block.
///
/// When this crate is built with the `unsafe` feature, this macro is
/// expanded to an `unsafe` block.  Place [`invariant!()`] inside it.
///
/// ```ignore
/// # // Internal macro: doctests run outside of this crate.
/// # let index = 3usize;
/// let window = [0u8; 9];
/// optionally_unsafe! {
///     invariant!(index < window.len());
/// }
/// let byte = window[index];
/// ```
#[doc(alias = "optionally_unsafe")]
macro_rules! optionally_unsafe_impl {
    {$($tokens: tt)*} => {
        cfg_if::cfg_if! {
            if #[cfg(feature = "unsafe")] {
                unsafe { $($tokens)* }
            }
            else {
                { $($tokens)* }
            }
        }
    };
}
pub(crate) use optionally_unsafe_impl as optionally_unsafe;

/// Declare an invariant for optimization.
///
/// Without the `unsafe` feature (and always on tests), this is a
/// [`debug_assert!()`].  With `unsafe`, a violated invariant is declared
/// unreachable so that the optimizer may drop bound checks.
#[doc(alias = "invariant")]
macro_rules! invariant_impl {
    ($expr: expr) => {
        cfg_if::cfg_if! {
            if #[cfg(all(feature = "unsafe", not(test)))] {
                if !($expr) {
                    core::hint::unreachable_unchecked();
                }
            }
            else {
                debug_assert!($expr);
            }
        }
    };
}
pub(crate) use invariant_impl as invariant;

mod tests;
