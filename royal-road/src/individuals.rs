use crate::bits::BitString;
use crate::schema::SchemaTable;

use rand::Rng;
use serde::{Deserialize, Serialize};

use std::fmt;

// Segment indices whose presence is tracked for reporting: the 8th
// 8-bit block, the 4th 16-bit segment and the 2nd 32-bit segment.
const SCHEMA8_INDEX: usize = 7;
const SCHEMA12_INDEX: usize = 11;
const SCHEMA14_INDEX: usize = 13;

/// Presence flags for the reporting schemas. These track convergence
/// of specific sub-goals across generations and play no part in
/// fitness itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaFlags {
    /// Segment index 7 (the last 8-bit block) scored nonzero.
    pub schema8: bool,
    /// Segment index 11 scored nonzero. Only ever set under the
    /// 14-segment variant.
    pub schema12: bool,
    /// Segment index 13 scored nonzero. Only ever set under the
    /// 14-segment variant.
    pub schema14: bool,
}

/// One candidate solution: a 64-bit string with its fitness score and
/// schema-presence flags, computed once at construction.
///
/// The score is a pure function of the bit string and the schema
/// table: matching segment weights are summed, a nonzero raw sum `s`
/// scores `10 * s`, and a raw sum of 0 scores 1 so that every
/// individual keeps a nonzero chance of reproduction.
///
/// # Examples
/// ```
/// use royal_road::{BitString, Individual, SchemaTable, SchemaVariant};
///
/// let table = SchemaTable::new(SchemaVariant::NonOverlapping8);
/// let best = Individual::from_bits(BitString::ones(), &table);
/// assert_eq!(best.score(), table.optimal_score());
///
/// let worst = Individual::from_bits(BitString::zeroes(), &table);
/// assert_eq!(worst.score(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    bits: BitString,
    score: u64,
    flags: SchemaFlags,
}

impl Individual {
    /// Builds an individual from an explicit bit string, computing
    /// its fitness against `table`.
    pub fn from_bits(bits: BitString, table: &SchemaTable) -> Individual {
        let mut raw_score = 0;
        let mut flags = SchemaFlags::default();
        for (index, segment) in table.segments().enumerate() {
            if segment.matches(bits) {
                raw_score += segment.weight;
                match index {
                    SCHEMA8_INDEX => flags.schema8 = true,
                    SCHEMA12_INDEX => flags.schema12 = true,
                    SCHEMA14_INDEX => flags.schema14 = true,
                    _ => {}
                }
            }
        }
        let score = if raw_score > 0 { 10 * raw_score } else { 1 };
        Individual { bits, score, flags }
    }

    /// Builds an individual with a uniformly random bit string.
    pub fn random<R: Rng>(rng: &mut R, table: &SchemaTable) -> Individual {
        Individual::from_bits(BitString::random(rng), table)
    }

    /// Returns the individual's bit string.
    pub fn bits(&self) -> BitString {
        self.bits
    }

    /// Returns the individual's fitness score. Always at least 1.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Returns the individual's schema-presence flags.
    pub fn flags(&self) -> SchemaFlags {
        self.flags
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.bits, self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaVariant;

    fn bits(s: &str) -> BitString {
        s.parse().unwrap()
    }

    #[test]
    fn fitness_is_deterministic() {
        let table = SchemaTable::new(SchemaVariant::NonOverlapping14);
        let pattern = bits(&format!("{}{}", "10".repeat(16), "1".repeat(32)));
        let first = Individual::from_bits(pattern, &table);
        let second = Individual::from_bits(pattern, &table);
        assert_eq!(first, second);
    }

    #[test]
    fn zero_raw_score_maps_to_one() {
        for variant in [
            SchemaVariant::NonOverlapping8,
            SchemaVariant::NonOverlapping14,
            SchemaVariant::Overlapping10,
        ] {
            let table = SchemaTable::new(variant);
            let individual = Individual::from_bits(BitString::zeroes(), &table);
            assert_eq!(individual.score(), 1);
            assert_eq!(individual.flags(), SchemaFlags::default());
        }
    }

    #[test]
    fn nonzero_raw_score_is_scaled_by_ten() {
        let table = SchemaTable::new(SchemaVariant::NonOverlapping8);
        // Exactly one complete block.
        let one_block = Individual::from_bits(
            bits(&format!("{}{}", "1".repeat(8), "0".repeat(56))),
            &table,
        );
        assert_eq!(one_block.score(), 10);
        // Two complete blocks.
        let two_blocks = Individual::from_bits(
            bits(&format!("{}{}", "1".repeat(16), "0".repeat(48))),
            &table,
        );
        assert_eq!(two_blocks.score(), 20);
    }

    #[test]
    fn all_ones_reaches_the_optimum_under_every_variant() {
        for (variant, optimum) in [
            (SchemaVariant::NonOverlapping8, 80),
            (SchemaVariant::NonOverlapping14, 240),
            (SchemaVariant::Overlapping10, 100),
        ] {
            let table = SchemaTable::new(variant);
            let individual = Individual::from_bits(BitString::ones(), &table);
            assert_eq!(individual.score(), optimum);
            assert!(individual.flags().schema8);
        }
    }

    #[test]
    fn flags_follow_the_tracked_segments() {
        let table = SchemaTable::new(SchemaVariant::NonOverlapping14);
        // Last quarter set: completes blocks 6 and 7, segment 11, but
        // not segment 13 (which needs the whole last half).
        let last_quarter = Individual::from_bits(
            bits(&format!("{}{}", "0".repeat(48), "1".repeat(16))),
            &table,
        );
        assert!(last_quarter.flags().schema8);
        assert!(last_quarter.flags().schema12);
        assert!(!last_quarter.flags().schema14);

        let last_half = Individual::from_bits(
            bits(&format!("{}{}", "0".repeat(32), "1".repeat(32))),
            &table,
        );
        assert!(last_half.flags().schema14);
    }

    #[test]
    fn eight_segment_variant_never_sets_higher_flags() {
        let table = SchemaTable::new(SchemaVariant::NonOverlapping8);
        let individual = Individual::from_bits(BitString::ones(), &table);
        assert!(individual.flags().schema8);
        assert!(!individual.flags().schema12);
        assert!(!individual.flags().schema14);
    }

    #[test]
    fn overlapping_variant_sets_schema8_from_window_seven() {
        let table = SchemaTable::new(SchemaVariant::Overlapping10);
        // Window 7 spans [42, 51].
        let window = Individual::from_bits(
            bits(&format!("{}{}{}", "0".repeat(42), "1".repeat(10), "0".repeat(12))),
            &table,
        );
        assert_eq!(window.score(), 10);
        assert!(window.flags().schema8);
    }

    #[test]
    fn individuals_serialize_to_json() {
        let table = SchemaTable::new(SchemaVariant::NonOverlapping8);
        let individual = Individual::from_bits(BitString::ones(), &table);
        let json = serde_json::to_string(&individual).unwrap();
        let back: Individual = serde_json::from_str(&json).unwrap();
        assert_eq!(individual, back);
    }
}
