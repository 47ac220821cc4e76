// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! Similarity metrics selectable by value (or by name).

use thiserror::Error;

use crate::compare::FactorMismatchError;
use crate::hash::UniformFuzzyHash;

/// A similarity metric between two fuzzy hashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SimilarityMetric {
    /// [`UniformFuzzyHash::similarity()`]
    #[default]
    Similarity,
    /// [`UniformFuzzyHash::reverse_similarity()`]
    ReverseSimilarity,
    /// [`UniformFuzzyHash::maximum_similarity()`]
    Maximum,
    /// [`UniformFuzzyHash::minimum_similarity()`]
    Minimum,
    /// [`UniformFuzzyHash::arithmetic_mean_similarity()`]
    ArithmeticMean,
    /// [`UniformFuzzyHash::geometric_mean_similarity()`]
    GeometricMean,
}

/// The error type for parsing an unknown [`SimilarityMetric`] name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown similarity metric: {0:?}")]
pub struct UnknownMetricError(pub String);

impl SimilarityMetric {
    /// All metrics.
    pub const ALL: [SimilarityMetric; 6] = [
        SimilarityMetric::Similarity,
        SimilarityMetric::ReverseSimilarity,
        SimilarityMetric::Maximum,
        SimilarityMetric::Minimum,
        SimilarityMetric::ArithmeticMean,
        SimilarityMetric::GeometricMean,
    ];

    /// The name of the metric.
    pub fn name(&self) -> &'static str {
        match self { // grcov-excl-br-line:MATCH_ENUM
            SimilarityMetric::Similarity        => "similarity",
            SimilarityMetric::ReverseSimilarity => "reverse-similarity",
            SimilarityMetric::Maximum           => "maximum",
            SimilarityMetric::Minimum           => "minimum",
            SimilarityMetric::ArithmeticMean    => "arithmetic-mean",
            SimilarityMetric::GeometricMean     => "geometric-mean",
        }
    }

    /// Returns whether `compute(a, b) == compute(b, a)` always holds.
    pub fn is_symmetric(&self) -> bool {
        !matches!(
            self,
            SimilarityMetric::Similarity | SimilarityMetric::ReverseSimilarity
        )
    }

    /// Computes the metric.
    pub fn compute(
        &self,
        lhs: &UniformFuzzyHash,
        rhs: &UniformFuzzyHash,
    ) -> Result<f64, FactorMismatchError> {
        match self {
            SimilarityMetric::Similarity => lhs.similarity(rhs),
            SimilarityMetric::ReverseSimilarity => lhs.reverse_similarity(rhs),
            SimilarityMetric::Maximum => lhs.maximum_similarity(rhs),
            SimilarityMetric::Minimum => lhs.minimum_similarity(rhs),
            SimilarityMetric::ArithmeticMean => lhs.arithmetic_mean_similarity(rhs),
            SimilarityMetric::GeometricMean => lhs.geometric_mean_similarity(rhs),
        }
    }
}

impl core::fmt::Display for SimilarityMetric {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for SimilarityMetric {
    type Err = UnknownMetricError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.name() == s)
            .ok_or_else(|| UnknownMetricError(s.to_string()))
    }
}

impl UniformFuzzyHash {
    /// Computes the given similarity metric.
    #[inline]
    pub fn compare_with(
        &self,
        other: &Self,
        metric: SimilarityMetric,
    ) -> Result<f64, FactorMismatchError> {
        metric.compute(self, other)
    }
}
