// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors
// grcov-excl-br-start

#![cfg(test)]

use crate::test_utils::{
    cover_auto_debug, init_test_logging, pseudo_random_bytes, pseudo_random_bytes_with,
    test_auto_clone,
};

#[test]
fn auto_clone_valid() {
    #[derive(PartialEq, Eq, Clone, Debug)]
    struct Example(u8);
    test_auto_clone(&Example(1));
    cover_auto_debug(&Example(2));
}

#[test]
#[should_panic]
fn auto_clone_counterexample() {
    #[derive(PartialEq, Eq, Debug)]
    struct Counterexample(u8);
    impl Clone for Counterexample {
        // BROKEN: returns fixed value rather than itself.
        fn clone(&self) -> Self { Self(0) }
    }
    test_auto_clone(&Counterexample(1));
}

#[test]
fn pseudo_random_is_deterministic() {
    assert_eq!(pseudo_random_bytes(1, 100), pseudo_random_bytes(1, 100));
    assert_ne!(pseudo_random_bytes(1, 100), pseudo_random_bytes(2, 100));
    // A prefix of a longer sequence is the shorter sequence.
    assert_eq!(pseudo_random_bytes(3, 1000)[..10], pseudo_random_bytes(3, 10)[..]);
    assert!(pseudo_random_bytes(4, 0).is_empty());
}

#[test]
fn pseudo_random_mask_and_or() {
    let low = pseudo_random_bytes_with(4, 4096, 0x7f, 0);
    assert!(low.iter().all(|&ch| ch < 0x80));
    let high = pseudo_random_bytes_with(5, 4096, 0x7f, 0x80);
    assert!(high.iter().all(|&ch| ch >= 0x80));
    // The whole byte range is reached.
    let full = pseudo_random_bytes(6, 65536);
    let mut seen = [false; 256];
    for &ch in full.iter() {
        seen[ch as usize] = true;
    }
    assert!(seen.iter().all(|&x| x));
}

#[test]
fn logging_init_is_idempotent() {
    init_test_logging();
    init_test_logging();
    tracing::debug!("logging initialized twice");
}
