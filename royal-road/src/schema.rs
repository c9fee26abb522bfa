//! Royal-road schema definitions.
//!
//! A schema is a range of bit positions that contributes a fixed
//! weight to fitness iff every bit in the range is 1. The three
//! tables here are the classic experiment variants: eight disjoint
//! 8-bit blocks, the full 14-segment hierarchy over the same 64 bits,
//! and ten overlapping 10-bit windows.

use crate::bits::BitString;
use crate::errors::SchemaError;

use serde::{Deserialize, Serialize};

/// One schema segment: an inclusive bit range and the weight it
/// contributes to fitness when fully set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// First bit position of the segment.
    pub start: usize,
    /// Last bit position of the segment (inclusive).
    pub end: usize,
    /// Raw fitness contribution when all bits in range are 1.
    pub weight: u64,
}

impl Segment {
    /// Returns whether `bits` matches the segment, i.e. every bit in
    /// `[start, end]` is 1.
    pub fn matches(&self, bits: BitString) -> bool {
        bits.all_set_in(self.start, self.end)
    }
}

/// The schema-table variants of the experiment.
///
/// Selected once per run; the variant fixes the segment table, the
/// raw score ceiling and therefore the optimal individual score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaVariant {
    /// Eight disjoint 8-bit blocks, weight 1 each. Raw maximum 8.
    NonOverlapping8,
    /// The eight 8-bit blocks plus four 16-bit segments (weight 2)
    /// and two 32-bit segments (weight 4), all aligned to
    /// power-of-two block boundaries. Raw maximum 24.
    NonOverlapping14,
    /// Ten 10-bit windows spaced 6 bits apart, weight 1 each.
    /// Raw maximum 10.
    Overlapping10,
}

/// An immutable table of schema segments for one variant.
///
/// The table is built once at engine initialization and shared
/// read-only by every fitness computation of the run.
///
/// # Examples
/// ```
/// use royal_road::{BitString, SchemaTable, SchemaVariant};
///
/// let table = SchemaTable::new(SchemaVariant::NonOverlapping8);
/// assert_eq!(table.len(), 8);
/// assert_eq!(table.check(7, BitString::ones()), Ok(1));
/// assert_eq!(table.check(7, BitString::zeroes()), Ok(0));
/// assert!(table.check(8, BitString::ones()).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaTable {
    variant: SchemaVariant,
    segments: Vec<Segment>,
}

impl SchemaTable {
    /// Builds the segment table for `variant`.
    pub fn new(variant: SchemaVariant) -> SchemaTable {
        let segments = match variant {
            SchemaVariant::NonOverlapping8 => base_blocks().collect(),
            SchemaVariant::NonOverlapping14 => base_blocks()
                .chain((0..4).map(|i| Segment {
                    start: 16 * i,
                    end: 16 * i + 15,
                    weight: 2,
                }))
                .chain((0..2).map(|i| Segment {
                    start: 32 * i,
                    end: 32 * i + 31,
                    weight: 4,
                }))
                .collect(),
            SchemaVariant::Overlapping10 => (0..10)
                .map(|i| Segment {
                    start: 6 * i,
                    end: 6 * i + 9,
                    weight: 1,
                })
                .collect(),
        };
        SchemaTable { variant, segments }
    }

    /// Returns the variant the table was built for.
    pub fn variant(&self) -> SchemaVariant {
        self.variant
    }

    /// Returns the number of segments in the table.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns whether the table is empty. Never true for the three
    /// experiment variants.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the table's segments.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Returns the segment's weight if every bit in its range is 1,
    /// and 0 otherwise.
    ///
    /// # Errors
    /// Returns [`SchemaError::SegmentOutOfRange`] if `index` is
    /// beyond the table. That is a programming error in callers: the
    /// engine only ever queries indices below [`len`](Self::len).
    pub fn check(&self, index: usize, bits: BitString) -> Result<u64, SchemaError> {
        let segment = self
            .segments
            .get(index)
            .ok_or(SchemaError::SegmentOutOfRange {
                index,
                count: self.segments.len(),
            })?;
        Ok(if segment.matches(bits) { segment.weight } else { 0 })
    }

    /// Returns the score of an individual matching every segment:
    /// ten times the raw weight sum.
    ///
    /// 80 for [`NonOverlapping8`], 240 for [`NonOverlapping14`] and
    /// 100 for [`Overlapping10`].
    ///
    /// [`NonOverlapping8`]: SchemaVariant::NonOverlapping8
    /// [`NonOverlapping14`]: SchemaVariant::NonOverlapping14
    /// [`Overlapping10`]: SchemaVariant::Overlapping10
    pub fn optimal_score(&self) -> u64 {
        10 * self.segments.iter().map(|s| s.weight).sum::<u64>()
    }
}

fn base_blocks() -> impl Iterator<Item = Segment> {
    (0..8).map(|i| Segment {
        start: 8 * i,
        end: 8 * i + 7,
        weight: 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::STRING_LEN;

    #[test]
    fn tables_have_the_expected_segment_counts() {
        assert_eq!(SchemaTable::new(SchemaVariant::NonOverlapping8).len(), 8);
        assert_eq!(SchemaTable::new(SchemaVariant::NonOverlapping14).len(), 14);
        assert_eq!(SchemaTable::new(SchemaVariant::Overlapping10).len(), 10);
    }

    #[test]
    fn non_overlapping_blocks_tile_the_string() {
        let table = SchemaTable::new(SchemaVariant::NonOverlapping8);
        for (i, segment) in table.segments().enumerate() {
            assert_eq!(segment.start, 8 * i);
            assert_eq!(segment.end, 8 * i + 7);
            assert_eq!(segment.weight, 1);
        }
        assert_eq!(table.segments().last().unwrap().end, STRING_LEN - 1);
    }

    #[test]
    fn fourteen_segment_table_extends_the_base_blocks() {
        let table = SchemaTable::new(SchemaVariant::NonOverlapping14);
        let segments: Vec<_> = table.segments().copied().collect();
        assert_eq!(segments[8], Segment { start: 0, end: 15, weight: 2 });
        assert_eq!(segments[11], Segment { start: 48, end: 63, weight: 2 });
        assert_eq!(segments[12], Segment { start: 0, end: 31, weight: 4 });
        assert_eq!(segments[13], Segment { start: 32, end: 63, weight: 4 });
    }

    #[test]
    fn overlapping_windows_slide_by_six_bits() {
        let table = SchemaTable::new(SchemaVariant::Overlapping10);
        for (i, segment) in table.segments().enumerate() {
            assert_eq!(segment.start, 6 * i);
            assert_eq!(segment.end, 6 * i + 9);
            assert_eq!(segment.weight, 1);
        }
        assert_eq!(table.segments().last().unwrap().end, STRING_LEN - 1);
    }

    #[test]
    fn check_scores_single_segments() {
        let table = SchemaTable::new(SchemaVariant::NonOverlapping14);
        let first_half: BitString = format!("{}{}", "1".repeat(32), "0".repeat(32))
            .parse()
            .unwrap();
        assert_eq!(table.check(0, first_half), Ok(1));
        assert_eq!(table.check(8, first_half), Ok(2));
        assert_eq!(table.check(12, first_half), Ok(4));
        assert_eq!(table.check(13, first_half), Ok(0));
    }

    #[test]
    fn check_reports_out_of_range_indices() {
        let table = SchemaTable::new(SchemaVariant::Overlapping10);
        assert_eq!(
            table.check(10, BitString::ones()),
            Err(SchemaError::SegmentOutOfRange { index: 10, count: 10 })
        );
    }

    #[test]
    fn optimal_scores_match_the_variant_ceilings() {
        assert_eq!(SchemaTable::new(SchemaVariant::NonOverlapping8).optimal_score(), 80);
        assert_eq!(SchemaTable::new(SchemaVariant::NonOverlapping14).optimal_score(), 240);
        assert_eq!(SchemaTable::new(SchemaVariant::Overlapping10).optimal_score(), 100);
    }
}
