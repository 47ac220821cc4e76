// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! Similarity between two uniform fuzzy hashes.

use thiserror::Error;

use crate::hash::UniformFuzzyHash;

pub mod metrics;


/// The error type representing a comparison between fuzzy hashes
/// generated with different factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot compare fuzzy hashes with different factors ({left} and {right})")]
pub struct FactorMismatchError {
    /// The factor of the left operand.
    pub left: u32,
    /// The factor of the right operand.
    pub right: u32,
}


/// Comparison.
///
/// # Similarity
///
/// The basic similarity is asymmetric: `a.similarity(&b)` is the fraction
/// of the bytes of `a` (by its blocks) which are covered by blocks also
/// found in `b` (by the block hash and size).  Duplicate blocks in `b`
/// count only once but each occurrence in `a` counts.
///
/// All the other metrics are computed from `a.similarity(&b)` and
/// `b.similarity(&a)`.  Every metric lies in `[0, 1]`.
///
/// # Caching
///
/// The result of [`similarity()`](Self::similarity()) is memoized in the
/// left operand, keyed by the identity of the right operand.  Two
/// structurally equal but distinct instances have separate entries.
///
/// # Examples
///
/// ```
/// use ufh::hash::UniformFuzzyHash;
///
/// let a: UniformFuzzyHash = "11:1094828995.6/65.1/65.1/65.1/65.1".parse().unwrap();
/// let b: UniformFuzzyHash = "11:1094828995.6/65.4".parse().unwrap();
/// assert_eq!(a.similarity(&b), Ok(0.6));
/// assert_eq!(a.similarity(&a), Ok(1.0));
///
/// let c: UniformFuzzyHash = "13:1094828995.6/65.4".parse().unwrap();
/// assert!(a.similarity(&c).is_err());
/// ```
impl UniformFuzzyHash {
    /// Checks whether two fuzzy hashes can be compared.
    #[inline]
    pub fn check_factor(&self, other: &Self) -> Result<(), FactorMismatchError> {
        if self.factor() != other.factor() {
            return Err(FactorMismatchError {
                left: self.factor(),
                right: other.factor(),
            });
        }
        Ok(())
    }

    /// Computes the similarity without consulting the cache.
    ///
    /// Both operands must have the same factor and at least one block.
    pub(crate) fn similarity_uncached(&self, other: &Self) -> f64 {
        debug_assert_eq!(self.factor(), other.factor());
        debug_assert!(self.data_size() != 0);
        let other_set = other.block_set();
        let matched: u64 = self
            .blocks()
            .iter()
            .filter(|block| other_set.contains(*block))
            .map(|block| block.size())
            .sum();
        matched as f64 / self.data_size() as f64
    }

    /// The similarity of `self` against `other`.
    ///
    /// Returns an error if the factors differ.
    pub fn similarity(&self, other: &Self) -> Result<f64, FactorMismatchError> {
        self.check_factor(other)?;
        if core::ptr::eq(self, other) {
            return Ok(1.0);
        }
        if self.is_empty() || other.is_empty() {
            return Ok(0.0);
        }
        Ok(self.memoized_similarity(other.instance_id(), || self.similarity_uncached(other)))
    }

    /// The similarity of `other` against `self`.
    #[inline]
    pub fn reverse_similarity(&self, other: &Self) -> Result<f64, FactorMismatchError> {
        other.similarity(self)
    }

    /// Both directions: `(self.similarity(other), other.similarity(self))`.
    #[inline]
    pub fn similarity_pair(&self, other: &Self) -> Result<(f64, f64), FactorMismatchError> {
        Ok((self.similarity(other)?, other.similarity(self)?))
    }

    /// The larger one of both directions.
    pub fn maximum_similarity(&self, other: &Self) -> Result<f64, FactorMismatchError> {
        let (forward, reverse) = self.similarity_pair(other)?;
        Ok(forward.max(reverse))
    }

    /// The smaller one of both directions.
    pub fn minimum_similarity(&self, other: &Self) -> Result<f64, FactorMismatchError> {
        let (forward, reverse) = self.similarity_pair(other)?;
        Ok(forward.min(reverse))
    }

    /// The arithmetic mean of both directions.
    pub fn arithmetic_mean_similarity(&self, other: &Self) -> Result<f64, FactorMismatchError> {
        let (forward, reverse) = self.similarity_pair(other)?;
        Ok((forward + reverse) / 2.0)
    }

    /// The geometric mean of both directions.
    pub fn geometric_mean_similarity(&self, other: &Self) -> Result<f64, FactorMismatchError> {
        let (forward, reverse) = self.similarity_pair(other)?;
        Ok((forward * reverse).sqrt())
    }
}
