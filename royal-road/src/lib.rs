//! An implementation of the Royal Road genetic-algorithm experiment,
//! following Mitchell, Forrest and Holland's classic setup: a
//! population of 64-bit strings is evolved toward a target fitness
//! built from a table of bit-segment schemas, using elitism,
//! fitness-proportional selection, single-point crossover and
//! per-bit mutation.
//!
//! Three schema variants are supported: eight non-overlapping 8-bit
//! blocks, the full 14-segment hierarchy over the same 64 bits, and
//! ten overlapping 10-bit windows. The engine tracks per-generation
//! schema-presence percentages and stops as soon as a mating produces
//! an individual with the variant's optimal score.
//!
//! All randomness comes from a single generator owned by the engine,
//! so a seeded run is fully reproducible.
//!
//! # Example usage: experiment 1A with a fixed seed
//! ```
//! use royal_road::{EngineConfig, Experiment, RoyalRoad};
//!
//! let variant = Experiment::A.variant(false);
//! let run = RoyalRoad::from_seed(variant, EngineConfig::default(), 42).unwrap();
//!
//! println!("Optimal score = {}", run.optimal_score());
//!
//! let report = run.find_optimal();
//! println!("{}", report.generations_to_solve());
//! for stats in report.history.iter() {
//!     println!("{}", stats);
//! }
//! ```

mod bits;
mod engine;
mod errors;
mod individuals;
pub mod logging;
mod populations;
mod schema;

pub use bits::{BitString, STRING_LEN};
pub use engine::{EngineConfig, Experiment, RoyalRoad};
pub use errors::{ConfigError, ParseBitStringError, ParseExperimentError, SchemaError};
pub use individuals::{Individual, SchemaFlags};
pub use logging::{RunReport, SchemaStats, StatsHistory};
pub use populations::Population;
pub use schema::{SchemaTable, SchemaVariant, Segment};
