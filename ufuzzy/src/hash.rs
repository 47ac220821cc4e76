// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! The uniform fuzzy hash (fingerprint) structure.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use dashmap::DashMap;

use crate::escape::COMPACT_FACTOR_SEP;
use crate::generate::validate_factor;
use crate::hash::algorithms::{parse_factor, parse_readable_blocks, write_readable, FACTOR_SEP};
use crate::hash::block::Block;
use crate::hash::compact::{parse_compact_blocks, write_compact};
use crate::hash::parser_state::{ParseError, ParseErrorKind, ParseErrorOrigin};

pub(crate) mod algorithms;
pub mod block;
pub mod characteristics;
pub(crate) mod compact;
pub mod parser_state;

/// The source of instance identities.
///
/// Each constructed (or cloned) fuzzy hash takes a new identity so that
/// the similarity cache of one instance never confuses two different
/// instances, even if one of them is dropped and its memory is reused.
static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(0);

#[inline]
fn next_instance_id() -> u64 {
    NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed)
}

/// The format of a fuzzy hash string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextFormat {
    /// The readable (decimal) format.
    Readable,
    /// The compact (escaped base-128) format.
    Compact,
}

/// A uniform fuzzy hash.
///
/// # Fuzzy Hash Internals
///
/// A uniform fuzzy hash splits the data into content-defined blocks
/// (whose mean size is roughly the *factor*) and stores, for each block,
/// a content hash and the block size.
///
/// ```text
/// 11:829382750.11/6562058.3
/// \/|\_______/|\/|\_______/
///  | |  hash  | |  next block...
///  | |        | +-- size
///  | |        +-- inner separator ('.')
///  | +-- factor separator (':'), blocks are separated by '/'
///  +-- factor
/// ```
///
/// Blocks are contiguous: the first one starts at offset zero and each
/// next one starts right after the previous one.  So the start offset of
/// each block is not stored in the string form.
///
/// The same structure also has a [compact form](Self::to_compact_string())
/// and both forms round-trip exactly.
///
/// # Identity and Caching
///
/// A fuzzy hash is immutable after construction except for two
/// memoized values: the block set (built on the first lookup) and the
/// similarity cache (keyed by the identity of the other operand).  Both
/// are safe to use from multiple threads.  [`Clone`] makes a new
/// instance with its own identity and an empty similarity cache.
///
/// Equality and hashing only consider the factor, the data size and the
/// ordered block sequence.
pub struct UniformFuzzyHash {
    /// The factor used to generate the fuzzy hash.
    factor: u32,
    /// The total size of the data.
    data_size: u64,
    /// Blocks (ordered by the start offset).
    blocks: Vec<Block>,
    /// The set of blocks (by hash and size), built on demand.
    block_set: OnceLock<HashSet<Block>>,
    /// Memoized similarity values keyed by the other instance's identity.
    similarity_cache: DashMap<u64, f64>,
    /// The identity of this instance.
    instance_id: u64,
}

impl UniformFuzzyHash {
    /// Creates a fuzzy hash from already consistent parts.
    pub(crate) fn from_blocks_unchecked(factor: u32, data_size: u64, blocks: Vec<Block>) -> Self {
        let hash = Self {
            factor,
            data_size,
            blocks,
            block_set: OnceLock::new(),
            similarity_cache: DashMap::new(),
            instance_id: next_instance_id(),
        };
        debug_assert!(hash.is_valid());
        hash
    }

    /// The factor used to generate the fuzzy hash.
    #[inline]
    pub fn factor(&self) -> u32 {
        self.factor
    }

    /// The total size of the data.
    #[inline]
    pub fn data_size(&self) -> u64 {
        self.data_size
    }

    /// The blocks, ordered by the start offset.
    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// The number of blocks.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Returns whether the fuzzy hash has no blocks
    /// (which means the data was empty).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// The identity of this instance (unique within the process).
    #[inline]
    pub(crate) fn instance_id(&self) -> u64 {
        self.instance_id
    }

    /// The set of distinct blocks (by the block hash and the block size).
    ///
    /// Duplicate blocks collapse into one entry.  The set is built on the
    /// first call and reused afterwards.
    pub fn block_set(&self) -> &HashSet<Block> {
        self.block_set
            .get_or_init(|| self.blocks.iter().copied().collect())
    }

    /// Returns whether a block with the same hash and size exists.
    #[inline]
    pub fn contains_block(&self, block: &Block) -> bool {
        self.block_set().contains(block)
    }

    /// Returns the similarity against the instance `other_id` from the
    /// cache, calling `compute` and storing its result on a miss.
    pub(crate) fn memoized_similarity(&self, other_id: u64, compute: impl FnOnce() -> f64) -> f64 {
        if let Some(value) = self.similarity_cache.get(&other_id) {
            let value = *value;
            tracing::trace!(left = self.instance_id, right = other_id, value, "similarity cache hit");
            return value;
        }
        let value = compute();
        tracing::trace!(left = self.instance_id, right = other_id, value, "similarity computed");
        self.similarity_cache.insert(other_id, value);
        value
    }

    /// The number of memoized similarity values.
    #[inline]
    pub fn cached_similarity_count(&self) -> usize {
        self.similarity_cache.len()
    }

    /// Clears memoized similarity values.
    #[inline]
    pub fn clear_similarity_cache(&self) {
        self.similarity_cache.clear();
    }

    #[cfg(test)]
    pub(crate) fn similarity_cache(&self) -> &DashMap<u64, f64> {
        &self.similarity_cache
    }

    /// Performs full validity checking of the internal structure.
    ///
    /// The primary purpose of this is debugging and it should always
    /// return [`true`] unless there is a bug in this crate.
    pub fn is_valid(&self) -> bool {
        if validate_factor(self.factor).is_err() {
            return false;
        }
        let mut next_start = 0u64;
        for block in self.blocks.iter() {
            if !block.is_valid() || block.start_offset() != next_start {
                return false;
            }
            next_start = match block.end_offset().checked_add(1) {
                Some(next) => next,
                None => return false,
            };
        }
        next_start == self.data_size
    }

    /// Converts the fuzzy hash to the compact form.
    pub fn to_compact_string(&self) -> String {
        let mut out = String::new();
        write_compact(&mut out, self.factor, &self.blocks);
        out
    }

    /// Converts the fuzzy hash to the string in the given format.
    pub fn to_string_in(&self, format: TextFormat) -> String {
        match format {
            TextFormat::Readable => self.to_string(),
            TextFormat::Compact => self.to_compact_string(),
        }
    }

    fn from_parts(
        str: &[u8],
        factor_sep: u8,
        parse_blocks: impl FnOnce(&[u8], usize) -> Result<(Vec<Block>, u64), ParseError>,
    ) -> Result<Self, ParseError> {
        let sep = str.iter().position(|&ch| ch == factor_sep).ok_or(ParseError(
            ParseErrorKind::FactorSeparatorNotFound,
            ParseErrorOrigin::Factor,
            str.len(),
        ))?;
        let factor = parse_factor(str, sep)?;
        let (blocks, data_size) = parse_blocks(&str[sep + 1..], sep + 1)?; // grcov-excl-br-line:ARRAY
        Ok(Self::from_blocks_unchecked(factor, data_size, blocks))
    }

    fn log_parse_result(
        result: Result<Self, ParseError>,
        format: TextFormat,
    ) -> Result<Self, ParseError> {
        if let Err(err) = &result {
            tracing::debug!(?format, %err, "failed to parse a fuzzy hash");
        }
        result
    }

    /// Parses a fuzzy hash in the readable form.
    ///
    /// This is the same as [`str::parse()`] on this type.
    pub fn from_readable_str(str: &str) -> Result<Self, ParseError> {
        Self::log_parse_result(
            Self::from_parts(str.as_bytes(), FACTOR_SEP, parse_readable_blocks),
            TextFormat::Readable,
        )
    }

    /// Parses a fuzzy hash in the compact form.
    pub fn from_compact_str(str: &str) -> Result<Self, ParseError> {
        Self::log_parse_result(
            Self::from_parts(str.as_bytes(), COMPACT_FACTOR_SEP, parse_compact_blocks),
            TextFormat::Compact,
        )
    }

    /// Detects the format of a fuzzy hash string.
    ///
    /// The format is decided by the first separator after the factor
    /// (`':'` for the readable form and `'|'` for the compact form).
    pub fn detect_format(str: &str) -> Result<TextFormat, ParseError> {
        match str
            .bytes()
            .find(|&ch| ch == FACTOR_SEP || ch == COMPACT_FACTOR_SEP)
        {
            Some(FACTOR_SEP) => Ok(TextFormat::Readable),
            Some(_) => Ok(TextFormat::Compact),
            None => Err(ParseError(
                ParseErrorKind::FactorSeparatorNotFound,
                ParseErrorOrigin::Factor,
                str.len(),
            )),
        }
    }

    /// Parses a fuzzy hash in the given format.
    pub fn from_str_in(str: &str, format: TextFormat) -> Result<Self, ParseError> {
        match format {
            TextFormat::Readable => Self::from_readable_str(str),
            TextFormat::Compact => Self::from_compact_str(str),
        }
    }

    /// Parses a fuzzy hash in either form.
    pub fn from_str_any(str: &str) -> Result<Self, ParseError> {
        match Self::detect_format(str) {
            Ok(format) => Self::from_str_in(str, format),
            Err(err) => Self::log_parse_result(Err(err), TextFormat::Readable),
        }
    }
}

impl Clone for UniformFuzzyHash {
    fn clone(&self) -> Self {
        Self {
            factor: self.factor,
            data_size: self.data_size,
            blocks: self.blocks.clone(),
            block_set: self.block_set.clone(),
            similarity_cache: DashMap::new(),
            instance_id: next_instance_id(),
        }
    }
}

impl PartialEq for UniformFuzzyHash {
    fn eq(&self, other: &Self) -> bool {
        self.factor == other.factor
            && self.data_size == other.data_size
            && self.blocks == other.blocks
    }
}

impl Eq for UniformFuzzyHash {}

impl core::hash::Hash for UniformFuzzyHash {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        state.write_u32(self.factor);
        state.write_u64(self.data_size);
        core::hash::Hash::hash(&self.blocks, state);
    }
}

impl core::fmt::Display for UniformFuzzyHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write_readable(f, self.factor, &self.blocks)
    }
}

impl core::fmt::Debug for UniformFuzzyHash {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UniformFuzzyHash")
            .field("factor", &self.factor)
            .field("data_size", &self.data_size)
            .field("blocks", &self.blocks)
            .finish()
    }
}

impl core::str::FromStr for UniformFuzzyHash {
    type Err = ParseError;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_readable_str(s)
    }
}
