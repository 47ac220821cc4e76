// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! Tests: [`crate::macros`].

#![cfg(test)]

#[forbid(unsafe_code)]
#[test]
#[should_panic]
fn violation_invariant() {
    // On tests, an invariant is just a debug_assert,
    // that should work outside an unsafe block.
    super::invariant!(false);
}

#[test]
fn satisfied_invariant_in_optionally_unsafe_block() {
    let window = [0u8; 4];
    let index = 3usize;
    super::optionally_unsafe! {
        super::invariant!(index < window.len());
    }
    assert_eq!(window[index], 0);
}
