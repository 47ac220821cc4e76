// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! Escaping rules of the compact form.
//!
//! Every value written in the compact form is a 7-bit digit (`0..=0x7f`)
//! stored as the ASCII character of the same code.  Characters which
//! cannot be stored as-is are written as [`ESCAPE`] followed by one
//! printable character:
//!
//! | Digit                         | Escaped form                  |
//! | ----------------------------- | ----------------------------- |
//! | `0x00..=0x1f` (control)       | `~` + `'@'..='_'` (`d ^ 0x40`) |
//! | `0x7f` (DEL)                  | `~?`                          |
//! | `~`, `\|`, `;`, `,`           | `~` + the character itself    |

/// The escape character of the compact form.
pub(crate) const ESCAPE: u8 = b'~';
/// Separator between the factor and the blocks (compact form).
pub(crate) const COMPACT_FACTOR_SEP: u8 = b'|';
/// Separator between two blocks (compact form).
pub(crate) const COMPACT_BLOCK_SEP: u8 = b';';
/// Separator between the block hash and the block size (compact form).
pub(crate) const COMPACT_INNER_SEP: u8 = b',';

/// Bits per digit of the compact form.
pub(crate) const DIGIT_BITS: u32 = 7;
/// The largest digit of the compact form.
pub(crate) const DIGIT_MAX: u8 = (1 << DIGIT_BITS) - 1;

/// The way a digit is written in the compact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EscapedDigit {
    /// Written as a single character.
    Plain(u8),
    /// Written as [`ESCAPE`] followed by the character.
    Escaped(u8),
}

/// Returns whether the character is structural in the compact form.
#[inline]
pub(crate) fn is_reserved(ch: u8) -> bool {
    matches!(ch, ESCAPE | COMPACT_FACTOR_SEP | COMPACT_BLOCK_SEP | COMPACT_INNER_SEP)
}

/// Decides how to write a digit.
#[inline]
pub(crate) fn escape_digit(digit: u8) -> EscapedDigit {
    debug_assert!(digit <= DIGIT_MAX);
    if digit < 0x20 || digit == 0x7f {
        EscapedDigit::Escaped(digit ^ 0x40)
    } else if is_reserved(digit) {
        EscapedDigit::Escaped(digit)
    } else {
        EscapedDigit::Plain(digit)
    }
}

/// Decodes the character after [`ESCAPE`] into a digit.
///
/// Returns [`None`] if `ch` is not a valid escaped character.
#[inline]
pub(crate) fn unescape_digit(ch: u8) -> Option<u8> {
    match ch {
        _ if is_reserved(ch) => Some(ch),
        b'@'..=b'_' | b'?' => Some(ch ^ 0x40),
        _ => None,
    }
}

/// Returns whether the character may appear unescaped as a digit.
#[inline]
pub(crate) fn is_plain_digit(ch: u8) -> bool {
    (0x20..0x7f).contains(&ch) && !is_reserved(ch)
}





// grcov-excl-tests-stop
