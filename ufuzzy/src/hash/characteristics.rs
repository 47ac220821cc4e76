// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: Copyright (C) 2026 The ufuzzy authors

//! Characteristics computed from a single fuzzy hash.

use crate::hash::UniformFuzzyHash;

/// A characteristic of a single [`UniformFuzzyHash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    /// The factor.
    Factor,
    /// The total size of the data.
    DataSize,
    /// The number of blocks.
    BlockCount,
    /// The mean block size (zero if there are no blocks).
    AverageBlockSize,
    /// The smallest block size (zero if there are no blocks).
    SmallestBlockSize,
    /// The largest block size (zero if there are no blocks).
    LargestBlockSize,
}

/// The value of a [`Characteristic`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CharacteristicValue {
    /// An integer value.
    Integer(u64),
    /// A real value.
    Real(f64),
}

impl CharacteristicValue {
    /// Converts the value to [`f64`].
    pub fn as_f64(&self) -> f64 {
        match *self {
            CharacteristicValue::Integer(value) => value as f64,
            CharacteristicValue::Real(value) => value,
        }
    }
}

impl core::fmt::Display for CharacteristicValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CharacteristicValue::Integer(value) => write!(f, "{}", value),
            CharacteristicValue::Real(value) => write!(f, "{}", value),
        }
    }
}

impl Characteristic {
    /// All characteristics.
    pub const ALL: [Characteristic; 6] = [
        Characteristic::Factor,
        Characteristic::DataSize,
        Characteristic::BlockCount,
        Characteristic::AverageBlockSize,
        Characteristic::SmallestBlockSize,
        Characteristic::LargestBlockSize,
    ];

    /// The name of the characteristic.
    pub fn name(&self) -> &'static str {
        match self { // grcov-excl-br-line:MATCH_ENUM
            Characteristic::Factor            => "factor",
            Characteristic::DataSize          => "data-size",
            Characteristic::BlockCount        => "block-count",
            Characteristic::AverageBlockSize  => "average-block-size",
            Characteristic::SmallestBlockSize => "smallest-block-size",
            Characteristic::LargestBlockSize  => "largest-block-size",
        }
    }

    /// Computes the characteristic of the given fuzzy hash.
    pub fn compute(&self, hash: &UniformFuzzyHash) -> CharacteristicValue {
        let sizes = hash.blocks().iter().map(|block| block.size());
        match self {
            Characteristic::Factor => CharacteristicValue::Integer(u64::from(hash.factor())),
            Characteristic::DataSize => CharacteristicValue::Integer(hash.data_size()),
            Characteristic::BlockCount => CharacteristicValue::Integer(hash.block_count() as u64),
            Characteristic::AverageBlockSize => CharacteristicValue::Real(if hash.is_empty() {
                0.0
            } else {
                hash.data_size() as f64 / hash.block_count() as f64
            }),
            Characteristic::SmallestBlockSize => {
                CharacteristicValue::Integer(sizes.min().unwrap_or(0))
            }
            Characteristic::LargestBlockSize => {
                CharacteristicValue::Integer(sizes.max().unwrap_or(0))
            }
        }
    }
}

impl core::fmt::Display for Characteristic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

impl UniformFuzzyHash {
    /// Computes a characteristic of this fuzzy hash.
    #[inline]
    pub fn characteristic(&self, characteristic: Characteristic) -> CharacteristicValue {
        characteristic.compute(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::block::Block;

    #[test]
    fn characteristics_of_vector() {
        // "AAAAAAAAAA" with factor 11
        let hash: UniformFuzzyHash = "11:1094828995.6/65.1/65.1/65.1/65.1".parse().unwrap();
        let values: Vec<_> = Characteristic::ALL.iter().map(|c| hash.characteristic(*c)).collect();
        assert_eq!(
            values,
            [
                CharacteristicValue::Integer(11),
                CharacteristicValue::Integer(10),
                CharacteristicValue::Integer(5),
                CharacteristicValue::Real(2.0),
                CharacteristicValue::Integer(1),
                CharacteristicValue::Integer(6),
            ]
        );
        assert_eq!(hash.block_set().len(), 2);
        assert!(hash.contains_block(&Block::new(65, 100, 1).unwrap()));
    }

    #[test]
    fn characteristics_of_empty() {
        let hash: UniformFuzzyHash = "13:".parse().unwrap();
        assert_eq!(hash.characteristic(Characteristic::BlockCount), CharacteristicValue::Integer(0));
        assert_eq!(hash.characteristic(Characteristic::AverageBlockSize), CharacteristicValue::Real(0.0));
        assert_eq!(hash.characteristic(Characteristic::SmallestBlockSize), CharacteristicValue::Integer(0));
        assert_eq!(hash.characteristic(Characteristic::LargestBlockSize), CharacteristicValue::Integer(0));
    }

    #[test]
    fn names_and_values() {
        let names: Vec<_> = Characteristic::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(
            names,
            [
                "factor",
                "data-size",
                "block-count",
                "average-block-size",
                "smallest-block-size",
                "largest-block-size"
            ]
        );
        assert_eq!(CharacteristicValue::Integer(3).to_string(), "3");
        assert_eq!(CharacteristicValue::Real(2.5).to_string(), "2.5");
        assert_eq!(CharacteristicValue::Integer(3).as_f64(), 3.0);
        assert_eq!(CharacteristicValue::Real(2.5).as_f64(), 2.5);
    }
}
