// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

#![cfg(feature = "easy-functions")]

use thiserror::Error;

use crate::compare::metrics::SimilarityMetric;
use crate::compare::FactorMismatchError;
use crate::hash::parser_state::{ParseError, ParseErrorInfo, ParseErrorKind, ParseErrorOrigin};
use crate::hash::UniformFuzzyHash;




/// The operand (side) which caused a parse error.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorSide {
    /// The left hand side.
    Left,
    /// The right hand side.
    Right,
}

impl ParseErrorSide {
    /// The 1-based operand number.
    fn number(&self) -> u8 {
        match self {
            ParseErrorSide::Left  => 1,
            ParseErrorSide::Right => 2,
        }
    }
}

/// The error type representing a parse error for one of the operands
/// specified to the [`compare()`] function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
    "error occurred while parsing fuzzy hash {} ({}, at byte offset {}): {}",
    .0.number(), .1.origin(), .1.offset(), .1.kind()
)]
pub struct ParseErrorEither(ParseErrorSide, #[source] ParseError);

impl ParseErrorEither {
    /// Returns which operand caused a parse error.
    pub fn side(&self) -> ParseErrorSide { self.0 }
}

impl ParseErrorInfo for ParseErrorEither {
    fn kind(&self)   -> ParseErrorKind { self.1.kind() }
    fn origin(&self) -> ParseErrorOrigin { self.1.origin() }
    fn offset(&self) -> usize { self.1.offset() }
}

/// The error type for [`compare()`] and [`compare_with()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompareError {
    /// One of the operands is not a valid fuzzy hash.
    #[error(transparent)]
    Parse(#[from] ParseErrorEither),
    /// The operands are generated with different factors.
    #[error(transparent)]
    FactorMismatch(#[from] FactorMismatchError),
}

fn parse_operands(
    lhs: &str,
    rhs: &str,
) -> Result<(UniformFuzzyHash, UniformFuzzyHash), ParseErrorEither> {
    let lhs = match UniformFuzzyHash::from_str_any(lhs) {
        Ok(value) => { value }
        Err(err)  => { return Err(ParseErrorEither(ParseErrorSide::Left, err)); }
    };
    let rhs = match UniformFuzzyHash::from_str_any(rhs) {
        Ok(value) => { value }
        Err(err)  => { return Err(ParseErrorEither(ParseErrorSide::Right, err)); }
    };
    Ok((lhs, rhs))
}

/// Compare two fuzzy hashes by the given metric.
///
/// Each operand may be in either the readable or the compact form.
///
/// # Example
///
/// ```
/// use ufh::compare::metrics::SimilarityMetric;
///
/// let score = ufh::compare_with(
///     "11:1094828995.6/65.1/65.1/65.1/65.1",
///     "11|~D~J~G~GC,~F;A,~D",
///     SimilarityMetric::Maximum,
/// ).unwrap();
/// assert_eq!(score, 0.6);
/// ```
pub fn compare_with(lhs: &str, rhs: &str, metric: SimilarityMetric) -> Result<f64, CompareError> {
    let (lhs, rhs) = parse_operands(lhs, rhs)?;
    Ok(metric.compute(&lhs, &rhs)?)
}

/// Compare two fuzzy hashes (the basic, asymmetric similarity).
///
/// If a parse error occurs, [`Err`] containing
/// [a parse error](CompareError::Parse) is returned.
/// Otherwise, [`Ok`] containing the similarity (`0.0..=1.0`) is returned.
///
/// # Example
///
/// ```
/// assert_eq!(
///     ufh::compare("11:829382750.11/6562058.3", "11:829382750.11/1.3").unwrap(),
///     11.0 / 14.0
/// );
/// ```
pub fn compare(lhs: &str, rhs: &str) -> Result<f64, CompareError> {
    compare_with(lhs, rhs, SimilarityMetric::Similarity)
}
