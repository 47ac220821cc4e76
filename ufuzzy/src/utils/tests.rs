// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! Tests: [`crate::utils`].

#![cfg(test)]

use super::{byte_length, shift_factor, sub_mod, window_size_for, MAX_WINDOW_SIZE};

#[test]
fn byte_length_boundaries() {
    assert_eq!(byte_length(0), 1);
    assert_eq!(byte_length(1), 1);
    assert_eq!(byte_length(11), 1);
    assert_eq!(byte_length(0xff), 1);
    assert_eq!(byte_length(0x100), 2);
    assert_eq!(byte_length(0xffff), 2);
    assert_eq!(byte_length(0x1_0000), 3);
    assert_eq!(byte_length(0xff_ffff), 3);
    assert_eq!(byte_length(0x100_0000), 4);
    assert_eq!(byte_length(u32::MAX), 4);
}

#[test]
fn window_size_never_exceeds_maximum() {
    for factor in [3u32, 11, 255, 257, 65537, 0x0100_0001, u32::MAX] {
        let window_size = window_size_for(factor);
        assert!(window_size <= MAX_WINDOW_SIZE, "failed on factor={}", factor);
        assert_eq!(window_size, byte_length(factor) + 5, "failed on factor={}", factor);
    }
}

#[test]
fn shift_factor_matches_naive_power() {
    // (factor, exponent, 256^exponent mod factor)
    const CASES: &[(u32, usize, u32)] = &[
        (11, 6, 3),
        (255, 6, 1),
        (257, 7, 256),
        (1001, 7, 438),
        (3, 0, 1),
    ];
    for &(factor, exponent, expected) in CASES {
        assert_eq!(
            shift_factor(exponent, factor),
            expected,
            "failed on factor={}, exponent={}",
            factor,
            exponent
        );
    }
    // Cross-check against u128 arithmetic for small exponents.
    for factor in (3u32..2000).step_by(2) {
        for exponent in 0..=4usize {
            let naive = (256u128.pow(exponent as u32) % u128::from(factor)) as u32;
            assert_eq!(shift_factor(exponent, factor), naive, "failed on factor={}, exponent={}", factor, exponent);
        }
    }
}

#[test]
fn shift_factor_large_modulus_does_not_overflow() {
    let value = shift_factor(MAX_WINDOW_SIZE, u32::MAX);
    let naive = (256u128.pow(MAX_WINDOW_SIZE as u32) % u128::from(u32::MAX)) as u32;
    assert_eq!(value, naive);
}

#[test]
fn sub_mod_is_true_modulo() {
    assert_eq!(sub_mod(5, 3, 11), 2);
    assert_eq!(sub_mod(3, 5, 11), 9);
    assert_eq!(sub_mod(0, 10, 11), 1);
    assert_eq!(sub_mod(7, 7, 11), 0);
}
