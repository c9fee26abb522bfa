use crate::errors::ParseBitStringError;

use rand::Rng;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Length of every chromosome in the experiment, in bits.
pub const STRING_LEN: usize = 64;

/// A fixed-length string of 64 bits.
///
/// Position 0 is the leftmost bit, as rendered by [`fmt::Display`].
/// Bit strings are small value types; crossover and mutation always
/// produce new values rather than sharing storage.
///
/// # Examples
/// ```
/// use royal_road::BitString;
///
/// let bits: BitString = "10".repeat(32).parse().unwrap();
/// assert!(bits.get(0));
/// assert!(!bits.get(1));
/// assert_eq!(bits.count_ones(), 32);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitString(u64);

impl BitString {
    /// Returns the all-zeroes bit string.
    pub const fn zeroes() -> BitString {
        BitString(0)
    }

    /// Returns the all-ones bit string.
    pub const fn ones() -> BitString {
        BitString(u64::MAX)
    }

    /// Returns a bit string with each of the 64 bits drawn
    /// independently and uniformly from {0, 1}.
    pub fn random<R: Rng>(rng: &mut R) -> BitString {
        BitString(rng.gen())
    }

    /// Returns the bit at `position`.
    ///
    /// # Panics
    /// Panics if `position >= 64`.
    pub fn get(&self, position: usize) -> bool {
        assert!(position < STRING_LEN, "bit position {} out of range", position);
        self.0 >> (STRING_LEN - 1 - position) & 1 == 1
    }

    /// Flips the bit at `position`.
    ///
    /// # Panics
    /// Panics if `position >= 64`.
    pub fn flip(&mut self, position: usize) {
        assert!(position < STRING_LEN, "bit position {} out of range", position);
        self.0 ^= 1 << (STRING_LEN - 1 - position);
    }

    /// Returns whether every bit in the inclusive range
    /// `[start, end]` is 1.
    pub fn all_set_in(&self, start: usize, end: usize) -> bool {
        assert!(start <= end && end < STRING_LEN, "bit range [{}, {}] out of range", start, end);
        let width = end - start + 1;
        let mask = if width == STRING_LEN {
            u64::MAX
        } else {
            ((1u64 << width) - 1) << (STRING_LEN - 1 - end)
        };
        self.0 & mask == mask
    }

    /// Returns the number of 1 bits.
    pub fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }

    /// Performs single-point crossover between two parent bit strings.
    ///
    /// The first child is `first`'s prefix `[0, point)` followed by
    /// `second`'s suffix `[point, 64)`; the second child is the
    /// reverse combination.
    ///
    /// # Panics
    /// Panics unless `point` lies in `[1, 62]`. Points 0 and 63 are
    /// rejected: splitting there would copy a whole parent (plus a
    /// lone bit) rather than recombine.
    ///
    /// # Examples
    /// ```
    /// use royal_road::BitString;
    ///
    /// let (c1, c2) = BitString::crossover(BitString::ones(), BitString::zeroes(), 8);
    /// assert_eq!(c1.to_string(), format!("{}{}", "1".repeat(8), "0".repeat(56)));
    /// assert_eq!(c2.to_string(), format!("{}{}", "0".repeat(8), "1".repeat(56)));
    /// ```
    pub fn crossover(first: BitString, second: BitString, point: usize) -> (BitString, BitString) {
        assert!(
            (1..=STRING_LEN - 2).contains(&point),
            "crossover point {} out of range [1, {}]",
            point,
            STRING_LEN - 2
        );
        let prefix_mask = u64::MAX << (STRING_LEN - point);
        let child1 = first.0 & prefix_mask | second.0 & !prefix_mask;
        let child2 = second.0 & prefix_mask | first.0 & !prefix_mask;
        (BitString(child1), BitString(child2))
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:064b}", self.0)
    }
}

impl FromStr for BitString {
    type Err = ParseBitStringError;

    fn from_str(s: &str) -> Result<BitString, ParseBitStringError> {
        if s.len() != STRING_LEN {
            return Err(ParseBitStringError::WrongLength(s.len()));
        }
        let mut bits = 0u64;
        for (position, c) in s.chars().enumerate() {
            match c {
                '0' => {}
                '1' => bits |= 1 << (STRING_LEN - 1 - position),
                other => return Err(ParseBitStringError::InvalidCharacter(other)),
            }
        }
        Ok(BitString(bits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn display_and_parse_round_trip() {
        let rendered = format!("{}{}", "1".repeat(10), "0".repeat(54));
        let bits: BitString = rendered.parse().unwrap();
        assert_eq!(bits.to_string(), rendered);
        assert_eq!(bits.count_ones(), 10);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(
            "101".parse::<BitString>(),
            Err(ParseBitStringError::WrongLength(3))
        );
        let with_junk = format!("{}2", "0".repeat(63));
        assert_eq!(
            with_junk.parse::<BitString>(),
            Err(ParseBitStringError::InvalidCharacter('2'))
        );
    }

    #[test]
    fn flip_toggles_single_positions() {
        let mut bits = BitString::zeroes();
        bits.flip(0);
        bits.flip(63);
        assert!(bits.get(0));
        assert!(bits.get(63));
        assert_eq!(bits.count_ones(), 2);
        bits.flip(0);
        assert!(!bits.get(0));
    }

    #[test]
    fn all_set_in_checks_inclusive_ranges() {
        let bits: BitString = format!("{}{}", "1".repeat(8), "0".repeat(56))
            .parse()
            .unwrap();
        assert!(bits.all_set_in(0, 7));
        assert!(!bits.all_set_in(0, 8));
        assert!(!bits.all_set_in(8, 15));
        assert!(BitString::ones().all_set_in(0, 63));
    }

    #[test]
    fn crossover_splits_at_the_chosen_point() {
        for point in 1..=STRING_LEN - 2 {
            let (c1, c2) = BitString::crossover(BitString::ones(), BitString::zeroes(), point);
            assert_eq!(c1.count_ones() as usize, point, "point {}", point);
            assert_eq!(c2.count_ones() as usize, STRING_LEN - point, "point {}", point);
            assert!(c1.all_set_in(0, point - 1));
            assert!(c2.all_set_in(point, STRING_LEN - 1));
        }
    }

    #[test]
    #[should_panic(expected = "crossover point")]
    fn crossover_rejects_point_zero() {
        BitString::crossover(BitString::ones(), BitString::zeroes(), 0);
    }

    #[test]
    #[should_panic(expected = "crossover point")]
    fn crossover_rejects_point_past_the_end() {
        BitString::crossover(BitString::ones(), BitString::zeroes(), STRING_LEN - 1);
    }

    #[test]
    fn random_is_reproducible_from_a_seed() {
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);
        assert_eq!(BitString::random(&mut rng1), BitString::random(&mut rng2));
    }
}
