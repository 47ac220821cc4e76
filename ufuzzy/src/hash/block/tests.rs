// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! Tests: [`crate::hash::block`].

#![cfg(test)]

use std::collections::HashSet;

use super::{Block, BLOCK_HASH_MODULO};

use crate::test_utils::{cover_auto_debug, test_auto_clone};

#[test]
fn basic_impls() {
    let block = Block::new(65, 6, 1).unwrap();
    test_auto_clone::<Block>(&block);
    cover_auto_debug(&block);
    assert_eq!(block.hash(), 65);
    assert_eq!(block.start_offset(), 6);
    assert_eq!(block.end_offset(), 6);
    assert_eq!(block.size(), 1);
    assert!(block.is_valid());
}

#[test]
fn new_rejects_invalid_arguments() {
    assert!(Block::new(BLOCK_HASH_MODULO - 1, 0, 1).is_some());
    assert!(Block::new(BLOCK_HASH_MODULO, 0, 1).is_none());
    assert!(Block::new(u32::MAX, 0, 1).is_none());
    assert!(Block::new(0, 0, 0).is_none());
    // The offset right after a block must be representable.
    assert!(Block::new(0, u64::MAX - 1, 1).is_some());
    assert!(Block::new(0, 0, u64::MAX).is_some());
    assert!(Block::new(0, u64::MAX, 1).is_none());
    assert!(Block::new(0, u64::MAX, 2).is_none());
    assert!(Block::new(0, 1, u64::MAX).is_none());
}

#[test]
fn block_ending_at_last_offset_is_invalid() {
    let block = Block::new_unchecked(0, u64::MAX, u64::MAX);
    assert!(!block.is_valid());
    let block = Block::new_unchecked(0, 0, u64::MAX - 1);
    assert!(block.is_valid());
    assert_eq!(block.size(), u64::MAX);
}

#[test]
fn equality_ignores_position() {
    let a = Block::new(1000, 0, 16).unwrap();
    let b = Block::new(1000, 512, 16).unwrap();
    let c = Block::new(1000, 0, 17).unwrap();
    let d = Block::new(1001, 0, 16).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, d);

    // Hash must agree with equality.
    let mut set = HashSet::new();
    assert!(set.insert(a));
    assert!(!set.insert(b));
    assert!(set.insert(c));
    assert!(set.insert(d));
    assert_eq!(set.len(), 3);
    assert!(set.contains(&Block::new(1000, 12345, 16).unwrap()));
}
