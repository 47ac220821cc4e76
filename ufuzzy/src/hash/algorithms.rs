// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

use crate::generate::validate_factor;
use crate::hash::block::{Block, BLOCK_HASH_MODULO};
use crate::hash::parser_state::{ParseError, ParseErrorKind, ParseErrorOrigin};




/// Separator between the factor and the blocks (readable form).
pub(crate) const FACTOR_SEP: u8 = b':';
/// Separator between two blocks (readable form).
pub(crate) const BLOCK_SEP: u8 = b'/';
/// Separator between the block hash and the block size (readable form).
pub(crate) const INNER_SEP: u8 = b'.';


/// A failure while parsing a decimal number, before it is attributed to
/// a specific field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DecimalError {
    /// No digits at all.
    Empty,
    /// A minus sign followed by digits.
    Negative,
    /// Any other non-digit character.
    NotNumeric,
    /// More than one digit with the first one being zero.
    StartsWithZero,
    /// Does not fit in [`u64`].
    TooLarge,
}

/// Parses a canonical unsigned decimal number.
///
/// Canonical means: digits only (no sign, no whitespace) and no leading
/// zeros unless the number is zero itself.
pub(crate) fn parse_decimal(digits: &[u8]) -> Result<u64, DecimalError> {
    match digits {
        [] => return Err(DecimalError::Empty),
        [b'-', rest @ ..] if !rest.is_empty() && rest.iter().all(u8::is_ascii_digit) => {
            return Err(DecimalError::Negative);
        }
        _ => {}
    }
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(DecimalError::NotNumeric);
    }
    if digits.len() > 1 && digits[0] == b'0' {
        return Err(DecimalError::StartsWithZero);
    }
    let mut value: u64 = 0;
    for &ch in digits {
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(ch - b'0')))
            .ok_or(DecimalError::TooLarge)?;
    }
    Ok(value)
}

/// Parses and validates the factor field (`str[..sep_index]`).
pub(crate) fn parse_factor(str: &[u8], sep_index: usize) -> Result<u32, ParseError> {
    let err = |kind| ParseError(kind, ParseErrorOrigin::Factor, 0);
    let value = parse_decimal(&str[..sep_index]).map_err(|e| match e {
        DecimalError::Empty => err(ParseErrorKind::FactorIsEmpty),
        DecimalError::Negative | DecimalError::NotNumeric => err(ParseErrorKind::FactorIsNotNumeric),
        DecimalError::StartsWithZero => err(ParseErrorKind::FactorStartsWithZero),
        DecimalError::TooLarge => err(ParseErrorKind::FactorIsTooLarge),
    })?;
    let factor = u32::try_from(value).map_err(|_| err(ParseErrorKind::FactorIsTooLarge))?;
    validate_factor(factor).map_err(|_| err(ParseErrorKind::FactorIsInvalid))?;
    Ok(factor)
}

/// Checks a parsed block hash against the valid range.
pub(crate) fn check_block_hash(
    value: Result<u64, DecimalError>,
    index: usize,
    offset: usize,
) -> Result<u32, ParseError> {
    let err = |kind| ParseError(kind, ParseErrorOrigin::Block(index), offset);
    match value {
        Ok(hash) if hash < u64::from(BLOCK_HASH_MODULO) => Ok(hash as u32),
        Ok(_) | Err(DecimalError::TooLarge) | Err(DecimalError::Negative) => {
            Err(err(ParseErrorKind::BlockHashIsOutOfRange))
        }
        Err(DecimalError::Empty) => Err(err(ParseErrorKind::BlockHashIsEmpty)),
        Err(DecimalError::NotNumeric) => Err(err(ParseErrorKind::BlockHashIsNotNumeric)),
        Err(DecimalError::StartsWithZero) => Err(err(ParseErrorKind::BlockHashStartsWithZero)),
    }
}

/// Checks a parsed block size (must be positive).
pub(crate) fn check_block_size(
    value: Result<u64, DecimalError>,
    index: usize,
    offset: usize,
) -> Result<u64, ParseError> {
    let err = |kind| ParseError(kind, ParseErrorOrigin::Block(index), offset);
    match value {
        Ok(0) => Err(err(ParseErrorKind::BlockSizeIsZero)),
        Ok(size) => Ok(size),
        Err(DecimalError::Empty) => Err(err(ParseErrorKind::BlockSizeIsEmpty)),
        Err(DecimalError::Negative) => Err(err(ParseErrorKind::BlockSizeIsNegative)),
        Err(DecimalError::NotNumeric) => Err(err(ParseErrorKind::BlockSizeIsNotNumeric)),
        Err(DecimalError::StartsWithZero) => Err(err(ParseErrorKind::BlockSizeStartsWithZero)),
        Err(DecimalError::TooLarge) => Err(err(ParseErrorKind::BlockSizeIsTooLarge)),
    }
}

/// Appends a block at `*data_size` and advances it by the block size.
pub(crate) fn push_block(
    blocks: &mut Vec<Block>,
    data_size: &mut u64,
    hash: u32,
    size: u64,
    offset: usize,
) -> Result<(), ParseError> {
    let index = blocks.len();
    // The next start offset must also be representable.
    let next_start = data_size
        .checked_add(size)
        .ok_or(ParseError(ParseErrorKind::DataSizeIsTooLarge, ParseErrorOrigin::Block(index), offset))?;
    blocks.push(Block::new_unchecked(hash, *data_size, next_start - 1));
    *data_size = next_start;
    Ok(())
}

/// Parses the blocks part of the readable form.
///
/// `base_offset` is the offset of `str` in the whole string
/// (only used for error reporting).
pub(crate) fn parse_readable_blocks(
    str: &[u8],
    base_offset: usize,
) -> Result<(Vec<Block>, u64), ParseError> {
    let mut blocks = Vec::new();
    let mut data_size = 0u64;
    if str.is_empty() {
        return Ok((blocks, data_size));
    }
    let mut offset = base_offset;
    for (index, token) in str.split(|&ch| ch == BLOCK_SEP).enumerate() {
        let inner = match token.iter().position(|&ch| ch == INNER_SEP) {
            Some(inner) => inner,
            None => {
                let kind = if token.is_empty() {
                    ParseErrorKind::BlockIsEmpty
                } else {
                    ParseErrorKind::InnerSeparatorNotFound
                };
                return Err(ParseError(kind, ParseErrorOrigin::Block(index), offset));
            }
        };
        let hash = check_block_hash(parse_decimal(&token[..inner]), index, offset)?;
        let size_offset = offset + inner + 1;
        let size = check_block_size(parse_decimal(&token[inner + 1..]), index, size_offset)?;
        push_block(&mut blocks, &mut data_size, hash, size, offset)?;
        offset += token.len() + 1;
    }
    Ok((blocks, data_size))
}

/// Writes the readable form of a fuzzy hash.
pub(crate) fn write_readable(
    f: &mut impl core::fmt::Write,
    factor: u32,
    blocks: &[Block],
) -> core::fmt::Result {
    write!(f, "{}{}", factor, FACTOR_SEP as char)?;
    for (index, block) in blocks.iter().enumerate() {
        if index != 0 {
            f.write_char(BLOCK_SEP as char)?;
        }
        write!(f, "{}{}{}", block.hash(), INNER_SEP as char, block.size())?;
    }
    Ok(())
}
