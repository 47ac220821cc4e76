// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

use thiserror::Error;

/// An enumeration representing a cause of
/// a [fuzzy hash](crate::hash::UniformFuzzyHash) parse error.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Factor: the separator after the factor is not found.
    FactorSeparatorNotFound,
    /// Factor: is empty.
    FactorIsEmpty,
    /// Factor: is not a decimal number.
    FactorIsNotNumeric,
    /// Factor: starts with the digit zero (`'0'`).
    FactorStartsWithZero,
    /// Factor: is too large to parse.
    FactorIsTooLarge,
    /// Factor: is not odd or not greater than 2.
    FactorIsInvalid,
    /// Block: the block token is empty.
    BlockIsEmpty,
    /// Block: the separator between the hash and the size is not found.
    InnerSeparatorNotFound,
    /// Block hash: is empty.
    BlockHashIsEmpty,
    /// Block hash: is not a number.
    BlockHashIsNotNumeric,
    /// Block hash: starts with a zero digit.
    BlockHashStartsWithZero,
    /// Block hash: is negative or not less than the block hash modulo.
    BlockHashIsOutOfRange,
    /// Block size: is empty.
    BlockSizeIsEmpty,
    /// Block size: is not a number.
    BlockSizeIsNotNumeric,
    /// Block size: is negative.
    BlockSizeIsNegative,
    /// Block size: starts with a zero digit.
    BlockSizeStartsWithZero,
    /// Block size: is zero.
    BlockSizeIsZero,
    /// Block size: is too large to parse.
    BlockSizeIsTooLarge,
    /// Block: the total size of the blocks overflows.
    DataSizeIsTooLarge,
    /// Any: an unexpected character is encountered.
    UnexpectedCharacter,
    /// Compact form: an escape character is followed by an invalid character.
    InvalidEscapeSequence,
    /// Any: an unexpected end-of-string is encountered.
    UnexpectedEndOfString,
}

impl core::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self { // grcov-excl-br-line:MATCH_ENUM
            ParseErrorKind::FactorSeparatorNotFound => "factor separator is not found",
            ParseErrorKind::FactorIsEmpty           => "factor field is empty",
            ParseErrorKind::FactorIsNotNumeric      => "factor is not numeric",
            ParseErrorKind::FactorStartsWithZero    => "factor starts with '0'",
            ParseErrorKind::FactorIsTooLarge        => "factor is too large",
            ParseErrorKind::FactorIsInvalid         => "factor is not valid",
            ParseErrorKind::BlockIsEmpty            => "block field is empty",
            ParseErrorKind::InnerSeparatorNotFound  => "separator between block hash and size is not found",
            ParseErrorKind::BlockHashIsEmpty        => "block hash field is empty",
            ParseErrorKind::BlockHashIsNotNumeric   => "block hash is not numeric",
            ParseErrorKind::BlockHashStartsWithZero => "block hash starts with '0'",
            ParseErrorKind::BlockHashIsOutOfRange   => "block hash is out of range",
            ParseErrorKind::BlockSizeIsEmpty        => "block size field is empty",
            ParseErrorKind::BlockSizeIsNotNumeric   => "block size is not numeric",
            ParseErrorKind::BlockSizeIsNegative     => "block size is negative",
            ParseErrorKind::BlockSizeStartsWithZero => "block size starts with '0'",
            ParseErrorKind::BlockSizeIsZero         => "block size is zero",
            ParseErrorKind::BlockSizeIsTooLarge     => "block size is too large",
            ParseErrorKind::DataSizeIsTooLarge      => "total data size is too large",
            ParseErrorKind::UnexpectedCharacter     => "an unexpected character is encountered",
            ParseErrorKind::InvalidEscapeSequence   => "invalid escape sequence",
            ParseErrorKind::UnexpectedEndOfString   => "end-of-string is not expected",
        })
    }
}


/// A part which (possibly) caused a
/// [fuzzy hash](crate::hash::UniformFuzzyHash) parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorOrigin {
    /// The factor (and the separator after it).
    Factor,
    /// The block with the given (0-based) index.
    Block(usize),
}

impl ParseErrorOrigin {
    /// Returns the index of the block which caused the error, if any.
    pub fn block_index(&self) -> Option<usize> {
        match self {
            ParseErrorOrigin::Factor => None,
            ParseErrorOrigin::Block(index) => Some(*index),
        }
    }
}

impl core::fmt::Display for ParseErrorOrigin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseErrorOrigin::Factor => f.write_str("factor"),
            ParseErrorOrigin::Block(index) => write!(f, "block {}", index),
        }
    }
}


// grcov-excl-br-start:STRUCT_MEMBER

/// The error type for parse operations of
/// [`UniformFuzzyHash`](crate::hash::UniformFuzzyHash).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("error occurred while parsing a fuzzy hash ({1}, at byte offset {2}): {0}")]
pub struct ParseError(
    pub(crate) ParseErrorKind,
    pub(crate) ParseErrorOrigin,
    pub(crate) usize
);

// grcov-excl-br-end

/// The trait implementing a
/// [`UniformFuzzyHash`](crate::hash::UniformFuzzyHash) parse error.
pub trait ParseErrorInfo {
    /// Returns the cause of the error.
    fn kind(&self) -> ParseErrorKind;
    /// Returns the part which (possibly) caused the error.
    fn origin(&self) -> ParseErrorOrigin;
    /// Returns the byte offset which (possibly) caused the error.
    ///
    /// Note that this offset may not be exact but may be usable as a hint.
    fn offset(&self) -> usize;
}

impl ParseErrorInfo for ParseError {
    fn kind(&self) -> ParseErrorKind { self.0 }
    fn origin(&self) -> ParseErrorOrigin { self.1 }
    fn offset(&self) -> usize { self.2 }
}





// grcov-excl-br-stop
