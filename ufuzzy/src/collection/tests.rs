// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! Tests: [`crate::collection`].

#![cfg(test)]

use std::io::{BufReader, Cursor, Seek, SeekFrom, Write};

use crate::collection::{
    parse_collection, read_collection, similarity_matrix, write_collection, CollectionError,
    LoadMode, NamedFuzzyHash,
};
use crate::compare::metrics::SimilarityMetric;
use crate::compare::FactorMismatchError;
use crate::generate::Generator;
use crate::hash::parser_state::{ParseErrorInfo, ParseErrorKind, ParseErrorOrigin};
use crate::hash::{TextFormat, UniformFuzzyHash};
use crate::test_utils::{init_test_logging, pseudo_random_bytes};

const SAMPLE: &str = "\
# name\thash
hello.txt\t11:829382750.11/6562058.3

repeated.txt\t11|~D~J~G~GC,~F;A,~A;A,~A;A,~A;A,~A
empty\t11:
";

fn hash_of(data: &[u8], factor: u32) -> UniformFuzzyHash {
    let mut generator = Generator::new(factor).unwrap();
    generator.update(data);
    generator.finalize()
}

#[test]
fn parse_sample() {
    let entries = parse_collection(SAMPLE, LoadMode::Strict).unwrap();
    let names: Vec<_> = entries.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, ["hello.txt", "repeated.txt", "empty"]);
    assert_eq!(entries[0].hash, hash_of(b"Hello, World!\n", 11));
    assert_eq!(entries[1].hash, hash_of(b"AAAAAAAAAA", 11));
    assert!(entries[2].hash.is_empty());
    // CRLF line endings.
    let crlf = SAMPLE.replace('\n', "\r\n");
    assert_eq!(parse_collection(&crlf, LoadMode::Strict).unwrap(), entries);
    // A name may contain spaces and the hash starts after the first tab.
    let entries = parse_collection("a b\t11:65.1\n", LoadMode::Strict).unwrap();
    assert_eq!(entries[0].name, "a b");
    assert!(parse_collection("", LoadMode::Strict).unwrap().is_empty());
}

#[test]
fn strict_errors_carry_line_numbers() {
    let text = "# header\nok\t11:65.1\nbad\t11:65.1/\n";
    let err = parse_collection(text, LoadMode::Strict).unwrap_err();
    assert_eq!(err.line(), Some(3));
    match &err {
        CollectionError::Parse { line, source } => {
            assert_eq!(*line, 3);
            assert_eq!(source.kind(), ParseErrorKind::BlockIsEmpty);
            assert_eq!(source.origin(), ParseErrorOrigin::Block(1));
        }
        _ => panic!("unexpected error: {:?}", err),
    }
    assert_eq!(
        err.to_string(),
        "line 3: error occurred while parsing a fuzzy hash (block 1, at byte offset 8): block field is empty"
    );

    let err = parse_collection("ok\t11:65.1\nno separator 11:65.1\n", LoadMode::Strict).unwrap_err();
    assert!(matches!(err, CollectionError::NameSeparatorNotFound { line: 2 }));
    assert_eq!(err.to_string(), "line 2: name separator is not found");

    let err = parse_collection("x\tabc:1.2", LoadMode::Strict).unwrap_err();
    assert_eq!(err.line(), Some(1));
    assert!(matches!(
        err,
        CollectionError::Parse { source, .. } if source.kind() == ParseErrorKind::FactorIsNotNumeric
    ));
}

#[test]
fn lenient_skips_bad_lines() {
    init_test_logging();
    let text = "a\t11:65.1\nbad line\nb\t11:1.-1\nc\t11|A,~A\n";
    let entries = parse_collection(text, LoadMode::Lenient).unwrap();
    let names: Vec<_> = entries.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, ["a", "c"]);
    assert_eq!(entries[0].hash, entries[1].hash);
    assert_eq!(LoadMode::default(), LoadMode::Strict);
}

#[test]
fn read_from_file() {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(SAMPLE.as_bytes()).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    let entries = read_collection(BufReader::new(file), LoadMode::Strict).unwrap();
    assert_eq!(entries, parse_collection(SAMPLE, LoadMode::Strict).unwrap());
}

#[test]
fn read_reports_io_errors() {
    // Invalid UTF-8 is an I/O error (even in the lenient mode).
    let err = read_collection(Cursor::new(b"a\t11:65.1\n\xff\n"), LoadMode::Lenient).unwrap_err();
    assert!(matches!(err, CollectionError::Io(_)));
    assert_eq!(err.line(), None);
}

#[test]
fn write_and_read_back() {
    let entries = vec![
        NamedFuzzyHash::new("hello.txt", hash_of(b"Hello, World!\n", 11)),
        NamedFuzzyHash::new("random", hash_of(&pseudo_random_bytes(1, 3000), 11)),
        NamedFuzzyHash::new("", hash_of(b"", 11)),
    ];
    for format in [TextFormat::Readable, TextFormat::Compact] {
        let mut out = Vec::new();
        write_collection(&mut out, &entries, format).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), entries.len());
        assert_eq!(parse_collection(&text, LoadMode::Strict).unwrap(), entries);
    }
    let mut out = Vec::new();
    write_collection(&mut out, &entries[..1], TextFormat::Readable).unwrap();
    assert_eq!(out, b"hello.txt\t11:829382750.11/6562058.3\n");
}

#[test]
fn write_rejects_invalid_names() {
    let hash = hash_of(b"Hello, World!\n", 11);
    for name in ["a\tb", "a\nb", "a\rb"] {
        let entries = [
            NamedFuzzyHash::new("ok", hash.clone()),
            NamedFuzzyHash::new(name, hash.clone()),
        ];
        assert!(!entries[1].is_name_valid());
        let mut out = Vec::new();
        let err = write_collection(&mut out, &entries, TextFormat::Readable).unwrap_err();
        assert!(matches!(&err, CollectionError::InvalidName(invalid) if invalid == name));
        // Nothing is written.
        assert!(out.is_empty());
    }
}

#[test]
fn matrix_of_all_pairs() {
    let a = pseudo_random_bytes(1, 4096);
    let mut b = a[..2048].to_vec();
    b.extend_from_slice(&pseudo_random_bytes(2, 2048));
    let entries = vec![
        NamedFuzzyHash::new("a", hash_of(&a, 11)),
        NamedFuzzyHash::new("b", hash_of(&b, 11)),
        NamedFuzzyHash::new("empty", hash_of(b"", 11)),
    ];
    let matrix = similarity_matrix(&entries, SimilarityMetric::Similarity).unwrap();
    assert_eq!(
        matrix,
        [
            1.0, 2046.0 / 4096.0, 0.0,
            0.5, 1.0, 0.0,
            0.0, 0.0, 1.0,
        ]
    );
    for metric in SimilarityMetric::ALL {
        let matrix = similarity_matrix(&entries, metric).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(
                    Ok(matrix[i * 3 + j]),
                    metric.compute(&entries[i].hash, &entries[j].hash)
                );
            }
        }
    }
    assert!(similarity_matrix(&[], SimilarityMetric::Maximum).unwrap().is_empty());
}

#[test]
fn matrix_factor_mismatch() {
    let entries = vec![
        NamedFuzzyHash::new("a", hash_of(b"Hello, World!\n", 11)),
        NamedFuzzyHash::new("b", hash_of(b"Hello, World!\n", 13)),
    ];
    let err = similarity_matrix(&entries, SimilarityMetric::Similarity).unwrap_err();
    assert!(
        err == FactorMismatchError { left: 11, right: 13 }
            || err == FactorMismatchError { left: 13, right: 11 }
    );
}
