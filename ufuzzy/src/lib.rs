// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! # ufuzzy: uniform fuzzy hashes
//!
//! A uniform fuzzy hash splits data into content-defined blocks using a
//! rolling hash over a small sliding window and keeps a content hash and
//! the size of each block.  The mean block size is roughly the *factor*
//! chosen by the user (an odd number greater than 2).  Since block
//! boundaries only depend on local content, similar data share many
//! blocks even if bytes are inserted or removed elsewhere.
//!
//! The similarity of a fuzzy hash `a` against `b` is the fraction of the
//! bytes of `a` covered by blocks also found in `b`.  It is asymmetric;
//! see [`UniformFuzzyHash`] for derived metrics.
//!
//! ## Usage
//!
//! ```
//! use ufh::{hash_buf, UniformFuzzyHash};
//!
//! let hash = hash_buf(b"Hello, World!\n", 11).unwrap();
//! assert_eq!(hash.to_string(), "11:829382750.11/6562058.3");
//!
//! // Both string forms round-trip.
//! let compact = hash.to_compact_string();
//! assert_eq!(UniformFuzzyHash::from_str_any(&compact).unwrap(), hash);
//!
//! let other: UniformFuzzyHash = "11:829382750.11/1.3".parse().unwrap();
//! assert_eq!(hash.similarity(&other).unwrap(), 11.0 / 14.0);
//! ```
//!
//! ## Crate Features
//!
//! *   `easy-functions` (default)
//!     [`hash_buf()`], [`hash_stream()`], [`hash_file()`] and [`compare()`].
//! *   `parallel` (default)
//!     Computes [`similarity_matrix()`](collection::similarity_matrix())
//!     on the rayon thread pool.
//! *   `unsafe`
//!     Lets internal invariants become optimizer hints.
//!
//! ## Logging
//!
//! This crate emits [`tracing`] events (fuzzy hash generation and parse
//! failures at `DEBUG`, similarity cache activity at `TRACE`, skipped
//! collection lines at `WARN`) but never installs a subscriber.

// unsafe code is *only* allowed on enabling the "unsafe" feature, or on
// the tests.
#![cfg_attr(not(any(feature = "unsafe", test)), forbid(unsafe_code))]
// Non-test code requires documents
#![cfg_attr(not(test), warn(missing_docs))]
// Tests: allow unused unsafe blocks (invariant! does will not need unsafe
// on tests but others may need this macro).
#![cfg_attr(test, allow(unused_unsafe))]
// Tests: constant (and/or obvious) assertions should be allowed.
#![cfg_attr(test, allow(clippy::assertions_on_constants))]
// Tests: exact floating point comparisons are intended.
#![cfg_attr(test, allow(clippy::float_cmp))]

pub mod collection;
pub mod compare;
mod compare_easy;
mod escape;
mod generate;
mod generate_easy;
mod generate_easy_std;
pub mod hash;
mod macros;
mod test_utils;
mod utils;

pub use collection::{CollectionError, LoadMode, NamedFuzzyHash};
pub use compare::metrics::{SimilarityMetric, UnknownMetricError};
pub use compare::FactorMismatchError;
#[cfg(feature = "easy-functions")]
pub use compare_easy::{compare, compare_with, CompareError, ParseErrorEither, ParseErrorSide};
pub use generate::{is_valid_factor, FactorError, Generator};
#[cfg(feature = "easy-functions")]
pub use generate_easy::hash_buf;
#[cfg(feature = "easy-functions")]
pub use generate_easy_std::{hash_file, hash_stream, GeneratorOrIOError};
pub use hash::block::{Block, BLOCK_HASH_MODULO};
pub use hash::characteristics::{Characteristic, CharacteristicValue};
pub use hash::parser_state::{ParseError, ParseErrorInfo, ParseErrorKind, ParseErrorOrigin};
pub use hash::{TextFormat, UniformFuzzyHash};

/// Module containing internal hash functions.
pub mod internal_hashes {
    pub use super::generate::{BlockHasher, RollingHash};
}

/// Constant assertions related to the base requirements.
#[doc(hidden)]
mod const_asserts {
    use super::*;
    use static_assertions::const_assert;

    // Offsets and sizes are u64 and indices are usize.
    const_assert!(usize::BITS >= 32);

    // Block hashes are 31-bit.
    const_assert!(BLOCK_HASH_MODULO < (1 << 31));

    // The window buffer covers the largest u32 factor.
    const_assert!(utils::MAX_WINDOW_SIZE == (u32::BITS / 8) as usize + utils::WINDOW_SIZE_EXTRA);

    // Any u64 fits in ten base-128 digits.
    const_assert!(escape::DIGIT_BITS * 10 >= u64::BITS);
}

mod tests;
