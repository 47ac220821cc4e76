// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors
// grcov-excl-br-start

#![cfg(test)]

mod tests;


/// Testing function for [`Eq`] + [`Clone`].
///
/// It also requires [`core::fmt::Debug`] for assertion.
pub(crate) fn test_auto_clone<T: Clone + Eq + core::fmt::Debug>(orig_value: &T) {
    let mut cloned: T = orig_value.clone();
    assert_eq!(*orig_value, cloned);
    cloned.clone_from(orig_value);
    assert_eq!(*orig_value, cloned);
}


/// Testing function for [`Debug`](core::fmt::Debug) (for coverage).
pub(crate) fn cover_auto_debug<T: core::fmt::Debug>(value: &T) {
    let _ = format!("{:?}", value);
}


/// Deterministic pseudo-random bytes (64-bit LCG, upper bits).
///
/// Each byte is `((state >> 33) & mask) | or`.
pub(crate) fn pseudo_random_bytes_with(seed: u64, len: usize, mask: u8, or: u8) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) as u8 & mask) | or
        })
        .collect()
}

/// Deterministic pseudo-random bytes covering the whole byte range.
pub(crate) fn pseudo_random_bytes(seed: u64, len: usize) -> Vec<u8> {
    pseudo_random_bytes_with(seed, len, 0xff, 0)
}


/// Installs a log subscriber writing to the test output.
///
/// The filter is taken from `RUST_LOG`.  Calling this multiple times
/// (from multiple tests) is fine.
pub(crate) fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
