// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! Tests: [`crate`].

#![cfg(test)]

use itertools::iproduct;

use crate::test_utils::{pseudo_random_bytes, pseudo_random_bytes_with};
use crate::{
    hash_buf, CollectionError, FactorError, LoadMode, ParseErrorInfo, ParseErrorKind,
    ParseErrorOrigin, SimilarityMetric, TextFormat, UniformFuzzyHash, UnknownMetricError,
};

const FACTORS: [u32; 5] = [3, 11, 101, 1001, 65537];

fn inputs() -> Vec<Vec<u8>> {
    vec![
        Vec::new(),
        b"A".to_vec(),
        b"AAAAAAAAAA".to_vec(),
        b"Hello, World!\n".to_vec(),
        // Bytes which need escaping in the compact form.
        (0u8..=255).cycle().take(2000).collect(),
        pseudo_random_bytes(1, 10000),
    ]
}

#[test]
fn round_trip_in_both_forms() {
    for (data, factor) in iproduct!(inputs(), FACTORS) {
        let hash = hash_buf(&data, factor).unwrap();
        for format in [TextFormat::Readable, TextFormat::Compact] {
            let text = hash.to_string_in(format);
            let parsed = UniformFuzzyHash::from_str_in(&text, format).unwrap();
            assert_eq!(parsed, hash, "failed on factor={}, text={:?}", factor, text);
            assert!(parsed.is_valid());
            // Byte-identical after re-serialization.
            assert_eq!(parsed.to_string_in(format), text);
            assert_eq!(UniformFuzzyHash::from_str_any(&text).unwrap(), hash);
        }
    }
}

#[test]
fn empty_input() {
    for factor in FACTORS {
        let hash = hash_buf(b"", factor).unwrap();
        assert!(hash.blocks().is_empty());
        assert_eq!(hash.data_size(), 0);
    }
}

#[test]
fn self_similarity() {
    for (data, factor) in iproduct!(inputs().into_iter().skip(1), FACTORS) {
        let hash = hash_buf(&data, factor).unwrap();
        let rebuilt = hash_buf(&data, factor).unwrap();
        let parsed = UniformFuzzyHash::from_compact_str(&hash.to_compact_string()).unwrap();
        for metric in SimilarityMetric::ALL {
            assert_eq!(hash.compare_with(&hash, metric), Ok(1.0));
            assert_eq!(hash.compare_with(&rebuilt, metric), Ok(1.0));
            assert_eq!(parsed.compare_with(&hash, metric), Ok(1.0));
        }
    }
}

#[test]
fn disjoint_content() {
    let low = pseudo_random_bytes_with(4, 8192, 0x7f, 0);
    let high = pseudo_random_bytes_with(5, 8192, 0x7f, 0x80);
    for factor in [11, 101] {
        let a = hash_buf(&low, factor).unwrap();
        let b = hash_buf(&high, factor).unwrap();
        assert_eq!(a.similarity(&b), Ok(0.0));
        assert_eq!(b.similarity(&a), Ok(0.0));
    }
}

#[test]
fn determinism() {
    for (data, factor) in iproduct!(inputs(), FACTORS) {
        let a = hash_buf(&data, factor).unwrap();
        let b = hash_buf(&data, factor).unwrap();
        assert_eq!(a.blocks(), b.blocks());
        assert_eq!(a.to_string(), b.to_string());
        assert_eq!(a.to_compact_string(), b.to_compact_string());
    }
}

#[test]
fn repeated_bytes_scenario() {
    let hash = hash_buf(b"AAAAAAAAAA", 11).unwrap();
    assert_eq!(hash.block_count(), 5);
    assert_eq!(hash.data_size(), 10);
    assert_eq!(hash.blocks()[0].size(), 6);
    assert!(hash.blocks()[1..].iter().all(|block| block.size() == 1 && block.hash() == 65));
}

#[test]
fn partially_shared_scenario() {
    // The second half is replaced.
    let a = pseudo_random_bytes(1, 4096);
    let mut b = a[..2048].to_vec();
    b.extend_from_slice(&pseudo_random_bytes(2, 2048));
    let a = hash_buf(&a, 11).unwrap();
    let b = hash_buf(&b, 11).unwrap();
    let forward = a.similarity(&b).unwrap();
    let reverse = b.similarity(&a).unwrap();
    assert!(0.0 < forward && forward < 1.0);
    assert!(0.0 < reverse && reverse < 1.0);
}

#[test]
fn invalid_factors() {
    assert_eq!(hash_buf(b"AAAAAAAAAA", 4).unwrap_err(), FactorError::NotOdd(4));
    assert_eq!(hash_buf(b"AAAAAAAAAA", 1).unwrap_err(), FactorError::TooSmall(1));
}

#[test]
fn non_numeric_factor() {
    let err = "abc:1.2".parse::<UniformFuzzyHash>().unwrap_err();
    assert_eq!(err.kind(), ParseErrorKind::FactorIsNotNumeric);
    assert_eq!(err.origin(), ParseErrorOrigin::Factor);
}

#[test]
fn errors_from_crate_root() {
    let err: UnknownMetricError = "median".parse::<SimilarityMetric>().unwrap_err();
    assert_eq!(err, UnknownMetricError("median".to_string()));
    let err: CollectionError =
        crate::collection::parse_collection("no-separator\n", LoadMode::Strict).unwrap_err();
    assert_eq!(err.line(), Some(1));
}
