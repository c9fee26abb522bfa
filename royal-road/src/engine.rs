use crate::bits::{BitString, STRING_LEN};
use crate::errors::{ConfigError, ParseExperimentError};
use crate::individuals::Individual;
use crate::logging::{RunReport, StatsHistory};
use crate::populations::Population;
use crate::schema::{SchemaTable, SchemaVariant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;
use std::str::FromStr;

/// Configuration data for a run of the experiment.
///
/// # Note
/// All quantities expressing probabilities should be in the range
/// [0.0, 1.0]. Using values that are not in this bound may result
/// in odd behaviours and/or incorrect programs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Size of the population.
    pub population_size: NonZeroUsize,
    /// Number of top individuals copied unchanged into each new
    /// generation.
    pub elite_count: usize,
    /// Chance that a mating pair recombines instead of copying the
    /// parents directly.
    pub crossover_rate: f32,
    /// Chance that each bit of a child is flipped. A rate of exactly
    /// 0 skips the mutation pass entirely.
    pub mutation_rate: f32,
    /// Maximum number of generations before the run gives up.
    pub generation_cap: usize,
}

impl EngineConfig {
    /// Checks that the elite/offspring split is exact: the elite
    /// must fit in the population, and the remainder must be even so
    /// that mating rounds of two children can fill it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let population = self.population_size.get();
        if self.elite_count > population {
            return Err(ConfigError::EliteExceedsPopulation {
                elite: self.elite_count,
                population,
            });
        }
        if (population - self.elite_count) % 2 != 0 {
            return Err(ConfigError::UnevenMatingSplit {
                elite: self.elite_count,
                population,
            });
        }
        Ok(())
    }

    /// Number of mating rounds per generation.
    fn mating_rounds(&self) -> usize {
        (self.population_size.get() - self.elite_count) / 2
    }
}

impl Default for EngineConfig {
    /// The classic experiment parameters: population 128, elite 42,
    /// crossover 0.7, mutation 0.005, cap 1500.
    ///
    /// # Examples
    /// ```
    /// use royal_road::EngineConfig;
    ///
    /// let config = EngineConfig::default();
    /// assert_eq!(config.population_size.get(), 128);
    /// assert_eq!(config.elite_count, 42);
    /// assert!(config.validate().is_ok());
    /// ```
    fn default() -> EngineConfig {
        EngineConfig {
            population_size: NonZeroUsize::new(128).unwrap(),
            elite_count: 42,
            crossover_rate: 0.7,
            mutation_rate: 0.005,
            generation_cap: 1500,
        }
    }
}

/// The experiment selector exposed to the command line: "1A" runs a
/// non-overlapping 8-segment schema (or the overlapping 10-segment
/// one when the overlap option is set), "1B" the full 14-segment
/// hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Experiment {
    A,
    B,
}

impl Experiment {
    /// Resolves the selector and overlap option to a schema variant.
    /// Overlap takes precedence over the selector.
    ///
    /// # Examples
    /// ```
    /// use royal_road::{Experiment, SchemaVariant};
    ///
    /// assert_eq!(Experiment::A.variant(false), SchemaVariant::NonOverlapping8);
    /// assert_eq!(Experiment::A.variant(true), SchemaVariant::Overlapping10);
    /// assert_eq!(Experiment::B.variant(false), SchemaVariant::NonOverlapping14);
    /// ```
    pub fn variant(self, overlap: bool) -> SchemaVariant {
        if overlap {
            SchemaVariant::Overlapping10
        } else {
            match self {
                Experiment::A => SchemaVariant::NonOverlapping8,
                Experiment::B => SchemaVariant::NonOverlapping14,
            }
        }
    }
}

impl FromStr for Experiment {
    type Err = ParseExperimentError;

    fn from_str(s: &str) -> Result<Experiment, ParseExperimentError> {
        match s {
            "1A" => Ok(Experiment::A),
            "1B" => Ok(Experiment::B),
            other => Err(ParseExperimentError(other.to_string())),
        }
    }
}

/// The Royal Road evolutionary engine.
///
/// Owns one population at a time and derives each new generation
/// from it through elitism, fitness-proportional selection,
/// single-point crossover and per-bit mutation, terminating as soon
/// as a mating produces an individual with the variant's optimal
/// score or when the generation cap runs out.
///
/// The engine draws all randomness from a single generator handed to
/// it at construction, so a seeded run is fully reproducible.
///
/// # Examples
/// ```
/// use royal_road::{EngineConfig, Experiment, RoyalRoad};
///
/// let variant = Experiment::A.variant(false);
/// let run = RoyalRoad::from_seed(variant, EngineConfig::default(), 42).unwrap();
/// let report = run.find_optimal();
/// println!("solved after {} generations", report.generations_to_solve());
/// ```
pub struct RoyalRoad<R: Rng> {
    table: SchemaTable,
    population: Population,
    config: EngineConfig,
    generation: usize,
    rng: R,
}

impl RoyalRoad<StdRng> {
    /// Creates an engine with a standard generator seeded from
    /// `seed`, for reproducible runs.
    pub fn from_seed(
        variant: SchemaVariant,
        config: EngineConfig,
        seed: u64,
    ) -> Result<RoyalRoad<StdRng>, ConfigError> {
        RoyalRoad::new(variant, config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RoyalRoad<R> {
    /// Creates an engine for `variant`, building a random initial
    /// population of the configured size.
    ///
    /// # Errors
    /// Returns an error if the configuration's elite/offspring split
    /// is not exact (see [`EngineConfig::validate`]).
    pub fn new(
        variant: SchemaVariant,
        config: EngineConfig,
        mut rng: R,
    ) -> Result<RoyalRoad<R>, ConfigError> {
        config.validate()?;
        let table = SchemaTable::new(variant);
        let mut population = Population::with_capacity(config.population_size.get());
        for _ in 0..config.population_size.get() {
            population.add(Individual::random(&mut rng, &table));
        }
        population.setup();
        Ok(RoyalRoad {
            table,
            population,
            config,
            generation: 0,
            rng,
        })
    }

    /// Returns the active schema table.
    pub fn schema_table(&self) -> &SchemaTable {
        &self.table
    }

    /// Returns the score an optimal individual would reach under the
    /// active variant.
    pub fn optimal_score(&self) -> u64 {
        self.table.optimal_score()
    }

    /// Returns the current population.
    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Returns the number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Runs generations until an optimal individual is discovered or
    /// the generation cap is exhausted, recording schema statistics
    /// for every generation before it advances.
    ///
    /// When an optimum is found mid-generation the history is
    /// truncated to the solve generation, matching the original
    /// experiment's reports.
    pub fn find_optimal(mut self) -> RunReport {
        let mut history = StatsHistory::new();
        let mut solved_at = None;
        for generation in 0..self.config.generation_cap {
            history.push(self.population.schema_stats());
            if self.next_generation() {
                solved_at = Some(generation);
                break;
            }
        }
        if let Some(generation) = solved_at {
            history.truncate(generation);
        }
        RunReport { solved_at, history }
    }

    /// Derives one new generation from the current population.
    ///
    /// The top [`elite_count`] individuals are copied unchanged, then
    /// mating rounds of selection, crossover and mutation fill the
    /// remainder two children at a time. Returns `true` if a mating
    /// produced an optimal individual, in which case the partially
    /// built population is discarded and the current one is kept.
    ///
    /// [`elite_count`]: EngineConfig::elite_count
    pub fn next_generation(&mut self) -> bool {
        let optimal_score = self.table.optimal_score();
        let mut next = Population::with_capacity(self.config.population_size.get());

        for elite in self.population.fittest(self.config.elite_count) {
            next.add(*elite);
        }

        for _ in 0..self.config.mating_rounds() {
            let parent1 = *self.population.select(&mut self.rng);
            let parent2 = *self.population.select(&mut self.rng);
            let (child1, child2) = self.mate(parent1, parent2);

            if child1.score() == optimal_score || child2.score() == optimal_score {
                return true;
            }

            next.add(child1);
            next.add(child2);
        }

        next.setup();
        self.population = next;
        self.generation += 1;
        false
    }

    /// Produces two children from two parents: crossover with the
    /// configured chance (direct copies otherwise), then mutation,
    /// then a fresh fitness computation from the resulting bits.
    fn mate(&mut self, parent1: Individual, parent2: Individual) -> (Individual, Individual) {
        let (bits1, bits2) = if self.rng.gen::<f32>() < self.config.crossover_rate {
            let point = self.rng.gen_range(1..=STRING_LEN - 2);
            BitString::crossover(parent1.bits(), parent2.bits(), point)
        } else {
            (parent1.bits(), parent2.bits())
        };
        let child1 = self.mutate(bits1);
        let child2 = self.mutate(bits2);
        (
            Individual::from_bits(child1, &self.table),
            Individual::from_bits(child2, &self.table),
        )
    }

    /// Flips each bit independently with the configured chance.
    fn mutate(&mut self, mut bits: BitString) -> BitString {
        if self.config.mutation_rate == 0.0 {
            return bits;
        }
        for position in 0..STRING_LEN {
            if self.rng.gen::<f32>() < self.config.mutation_rate {
                bits.flip(position);
            }
        }
        bits
    }
}
