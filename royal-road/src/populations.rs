use crate::individuals::Individual;
use crate::logging::SchemaStats;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// An ordered collection of individuals.
///
/// A population is filled with [`add`], then frozen with [`setup`],
/// which sorts the members ascending by score and records the score
/// sum used by roulette-wheel selection. Each generation the engine
/// builds a fresh population rather than mutating the old one.
///
/// [`add`]: Population::add
/// [`setup`]: Population::setup
///
/// # Examples
/// ```
/// use royal_road::{BitString, Individual, Population, SchemaTable, SchemaVariant};
///
/// let table = SchemaTable::new(SchemaVariant::NonOverlapping8);
/// let mut population = Population::new();
/// population.add(Individual::from_bits(BitString::ones(), &table));
/// population.add(Individual::from_bits(BitString::zeroes(), &table));
/// population.setup();
///
/// assert_eq!(population.sum_score(), 81);
/// assert_eq!(population.champion().score(), 80);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Population {
    individuals: Vec<Individual>,
    sum_score: u64,
}

impl Population {
    /// Creates an empty population.
    pub fn new() -> Population {
        Population::default()
    }

    /// Creates an empty population with room for `capacity` members.
    pub fn with_capacity(capacity: usize) -> Population {
        Population {
            individuals: Vec::with_capacity(capacity),
            sum_score: 0,
        }
    }

    /// Appends an individual. Sort order and the score sum are not
    /// maintained until [`setup`](Population::setup) is called.
    pub fn add(&mut self, individual: Individual) {
        self.individuals.push(individual);
    }

    /// Sorts the members ascending by score and computes the score
    /// sum. Members with equal scores keep their insertion order.
    ///
    /// Must be called before [`select`], [`fittest`] or
    /// [`champion`] are meaningful.
    ///
    /// [`select`]: Population::select
    /// [`fittest`]: Population::fittest
    /// [`champion`]: Population::champion
    pub fn setup(&mut self) {
        self.individuals.sort_by_key(|individual| individual.score());
        self.sum_score = self.individuals.iter().map(|i| i.score()).sum();
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Returns whether the population has no members.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Returns the sum of all member scores, as computed by the last
    /// [`setup`](Population::setup) call.
    pub fn sum_score(&self) -> u64 {
        self.sum_score
    }

    /// Returns an iterator over the members, least fit first once
    /// [`setup`](Population::setup) has run.
    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.iter()
    }

    /// Performs fitness-proportional (roulette-wheel) selection.
    ///
    /// A target is drawn uniformly from `[0, sum_score)`; members are
    /// scanned from the least fit, accumulating scores, and the first
    /// whose cumulative sum reaches the target is returned. Fitter
    /// members occupy larger slices of the range, but every member
    /// (scores are at least 1) keeps a nonzero chance.
    ///
    /// # Panics
    /// Panics if the population is empty or
    /// [`setup`](Population::setup) has not been called.
    pub fn select<R: Rng>(&self, rng: &mut R) -> &Individual {
        assert!(!self.individuals.is_empty(), "selection from an empty population");
        assert!(self.sum_score > 0, "selection before setup");
        let target = rng.gen_range(0..self.sum_score);
        let mut cumulative = 0;
        for individual in &self.individuals {
            cumulative += individual.score();
            if cumulative >= target {
                return individual;
            }
        }
        // The cumulative sum always reaches sum_score, so the scan
        // cannot fall through; keep the fittest member as a backstop.
        self.individuals.last().expect("population is non-empty")
    }

    /// Returns the `count` highest-scoring members, fittest first.
    /// Ties are broken by position in the sorted order.
    ///
    /// Meaningful only after [`setup`](Population::setup).
    pub fn fittest(&self, count: usize) -> impl Iterator<Item = &Individual> {
        self.individuals.iter().rev().take(count)
    }

    /// Returns the best-performing member.
    ///
    /// # Panics
    /// Panics if the population is empty.
    pub fn champion(&self) -> &Individual {
        self.individuals
            .iter()
            .max_by_key(|individual| individual.score())
            .expect("empty population has no champion")
    }

    /// Returns the percentage of members (0-100, rounded to nearest)
    /// carrying each of the tracked schema flags.
    pub fn schema_stats(&self) -> SchemaStats {
        if self.individuals.is_empty() {
            return SchemaStats::default();
        }
        let total = self.individuals.len() as f64;
        let mut schema8 = 0;
        let mut schema12 = 0;
        let mut schema14 = 0;
        for individual in &self.individuals {
            let flags = individual.flags();
            schema8 += flags.schema8 as usize;
            schema12 += flags.schema12 as usize;
            schema14 += flags.schema14 as usize;
        }
        let percentage = |count: usize| (count as f64 / total * 100.0).round() as u32;
        SchemaStats {
            pct_schema8: percentage(schema8),
            pct_schema12: percentage(schema12),
            pct_schema14: percentage(schema14),
        }
    }
}
