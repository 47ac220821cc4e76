// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! The compact (escaped) form of a uniform fuzzy hash.
//!
//! ```text
//! 11|~C~K=@^,~K;~C~PB~J,~C
//! \/|\_______/|\/|\________
//!  | |   hash  | |  next block...
//!  | |         | +-- size
//!  | |         +-- inner separator (',')
//!  | +-- factor separator ('|'), blocks are separated by ';'
//!  +-- factor (decimal)
//! ```
//!
//! Each block number is written in base 128 (most significant digit
//! first) and each digit is stored as one character, escaped as described
//! in [`crate::escape`].
//!
//! Both directions are two-pass.  Writing first produces a stream of
//! [`Token`]s and then escapes it.  Reading first unescapes the string
//! into tokens (so an escaped separator is always a digit) and then
//! assembles the blocks.

use crate::escape::{
    self, EscapedDigit, COMPACT_BLOCK_SEP, COMPACT_FACTOR_SEP, COMPACT_INNER_SEP, DIGIT_BITS,
    ESCAPE,
};
use crate::hash::algorithms::{check_block_hash, check_block_size, push_block, DecimalError};
use crate::hash::block::Block;
use crate::hash::parser_state::{ParseError, ParseErrorKind, ParseErrorOrigin};

/// A logical element of the compact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    /// A base-128 digit.
    Digit(u8),
    /// The separator between the block hash and the block size.
    InnerSeparator,
    /// The separator between two blocks.
    BlockSeparator,
}

/// Appends base-128 digits of `value` (most significant first).
fn push_digits(tokens: &mut Vec<Token>, mut value: u64) {
    let start = tokens.len();
    loop {
        tokens.push(Token::Digit((value & u64::from(escape::DIGIT_MAX)) as u8));
        value >>= DIGIT_BITS;
        if value == 0 {
            break;
        }
    }
    tokens[start..].reverse();
}

/// First pass of writing: blocks to tokens.
pub(crate) fn blocks_to_tokens(blocks: &[Block]) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(blocks.len() * 8);
    for (index, block) in blocks.iter().enumerate() {
        if index != 0 {
            tokens.push(Token::BlockSeparator);
        }
        push_digits(&mut tokens, u64::from(block.hash()));
        tokens.push(Token::InnerSeparator);
        push_digits(&mut tokens, block.size());
    }
    tokens
}

/// Second pass of writing: tokens to escaped characters.
pub(crate) fn write_tokens(out: &mut String, tokens: &[Token]) {
    for token in tokens {
        match *token {
            Token::InnerSeparator => out.push(COMPACT_INNER_SEP as char),
            Token::BlockSeparator => out.push(COMPACT_BLOCK_SEP as char),
            Token::Digit(digit) => match escape::escape_digit(digit) {
                EscapedDigit::Plain(ch) => out.push(ch as char),
                EscapedDigit::Escaped(ch) => {
                    out.push(ESCAPE as char);
                    out.push(ch as char);
                }
            },
        }
    }
}

/// Writes the compact form of a fuzzy hash.
pub(crate) fn write_compact(out: &mut String, factor: u32, blocks: &[Block]) {
    out.push_str(&factor.to_string());
    out.push(COMPACT_FACTOR_SEP as char);
    write_tokens(out, &blocks_to_tokens(blocks));
}

/// First pass of reading: unescapes characters into tokens.
///
/// Each token is paired with the byte offset where it starts.
pub(crate) fn tokenize(
    str: &[u8],
    base_offset: usize,
) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::with_capacity(str.len());
    let mut block_index = 0usize;
    let mut i = 0usize;
    while i < str.len() {
        let offset = base_offset + i;
        let err = move |kind| ParseError(kind, ParseErrorOrigin::Block(block_index), offset);
        let ch = str[i]; // grcov-excl-br-line:ARRAY
        let token = match ch {
            ESCAPE => {
                i += 1;
                let escaped = *str
                    .get(i)
                    .ok_or_else(|| err(ParseErrorKind::UnexpectedEndOfString))?;
                Token::Digit(
                    escape::unescape_digit(escaped)
                        .ok_or_else(|| err(ParseErrorKind::InvalidEscapeSequence))?,
                )
            }
            COMPACT_INNER_SEP => Token::InnerSeparator,
            COMPACT_BLOCK_SEP => {
                block_index += 1;
                Token::BlockSeparator
            }
            _ if escape::is_plain_digit(ch) => Token::Digit(ch),
            _ => return Err(err(ParseErrorKind::UnexpectedCharacter)),
        };
        tokens.push((token, offset));
        i += 1;
    }
    Ok(tokens)
}

/// Accumulates a base-128 number from digit tokens.
fn digits_to_number(digits: &[(Token, usize)]) -> Result<u64, DecimalError> {
    match digits {
        [] => return Err(DecimalError::Empty),
        [(Token::Digit(0), _), _, ..] => return Err(DecimalError::StartsWithZero),
        _ => {}
    }
    let mut value = 0u64;
    for &(token, _) in digits {
        let digit = match token {
            Token::Digit(digit) => digit,
            _ => return Err(DecimalError::NotNumeric),
        };
        if value.leading_zeros() < DIGIT_BITS {
            return Err(DecimalError::TooLarge);
        }
        value = (value << DIGIT_BITS) | u64::from(digit);
    }
    Ok(value)
}

/// Second pass of reading: assembles blocks from tokens.
///
/// `base_offset` is the offset where the token stream starts.
pub(crate) fn tokens_to_blocks(
    tokens: &[(Token, usize)],
    base_offset: usize,
) -> Result<(Vec<Block>, u64), ParseError> {
    let mut blocks = Vec::new();
    let mut data_size = 0u64;
    if tokens.is_empty() {
        return Ok((blocks, data_size));
    }
    let mut group_offset = base_offset;
    let mut rest = tokens;
    let mut index = 0usize;
    loop {
        let (group, next) = match rest
            .iter()
            .position(|(token, _)| *token == Token::BlockSeparator)
        {
            Some(sep) => (&rest[..sep], Some((rest[sep].1, &rest[sep + 1..]))),
            None => (rest, None),
        };
        let err = |kind, offset| ParseError(kind, ParseErrorOrigin::Block(index), offset);
        let inner = match group
            .iter()
            .position(|(token, _)| *token == Token::InnerSeparator)
        {
            Some(inner) => inner,
            None if group.is_empty() => {
                return Err(err(ParseErrorKind::BlockIsEmpty, group_offset))
            }
            None => return Err(err(ParseErrorKind::InnerSeparatorNotFound, group_offset)),
        };
        let hash_digits = &group[..inner];
        let size_digits = &group[inner + 1..];
        let size_offset = group[inner].1 + 1;
        if let Some(&(_, offset)) = size_digits
            .iter()
            .find(|(token, _)| *token == Token::InnerSeparator)
        {
            return Err(err(ParseErrorKind::UnexpectedCharacter, offset));
        }
        let hash = check_block_hash(digits_to_number(hash_digits), index, group_offset)?;
        let size = check_block_size(digits_to_number(size_digits), index, size_offset)?;
        push_block(&mut blocks, &mut data_size, hash, size, group_offset)?;
        match next {
            Some((sep_offset, remaining)) => {
                group_offset = sep_offset + 1;
                rest = remaining;
                index += 1;
            }
            None => break,
        }
    }
    Ok((blocks, data_size))
}

/// Parses the blocks part of the compact form.
pub(crate) fn parse_compact_blocks(
    str: &[u8],
    base_offset: usize,
) -> Result<(Vec<Block>, u64), ParseError> {
    let tokens = tokenize(str, base_offset)?;
    tokens_to_blocks(&tokens, base_offset)
}
