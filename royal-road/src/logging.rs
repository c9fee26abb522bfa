//! Per-generation schema-presence tracking.
//!
//! The engine records a [`SchemaStats`] snapshot of the current
//! population before every generational advance; a run's snapshots
//! accumulate in a [`StatsHistory`] and end up in the terminal
//! [`RunReport`].

use serde::{Deserialize, Serialize};

use std::fmt;

/// Schema-presence percentages for one population snapshot.
///
/// Each value is the percentage (0-100, rounded to nearest) of
/// individuals carrying the corresponding flag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaStats {
    pub pct_schema8: u32,
    pub pct_schema12: u32,
    pub pct_schema14: u32,
}

impl fmt::Display for SchemaStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "s8 {}% s12 {}% s14 {}%",
            self.pct_schema8, self.pct_schema12, self.pct_schema14
        )
    }
}

/// The sequence of per-generation snapshots of one run, indexed by
/// generation number.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsHistory {
    entries: Vec<SchemaStats>,
}

impl StatsHistory {
    /// Creates an empty history.
    pub fn new() -> StatsHistory {
        StatsHistory::default()
    }

    /// Appends the next generation's snapshot.
    pub fn push(&mut self, stats: SchemaStats) {
        self.entries.push(stats);
    }

    /// Returns the number of recorded generations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no generations have been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops all entries past the first `len` generations.
    pub fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    /// Returns an iterator over the snapshots, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaStats> {
        self.entries.iter()
    }

    /// Returns the schema-8 percentage series.
    pub fn schema8(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|stats| stats.pct_schema8)
    }

    /// Returns the schema-12 percentage series.
    pub fn schema12(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|stats| stats.pct_schema12)
    }

    /// Returns the schema-14 percentage series.
    pub fn schema14(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|stats| stats.pct_schema14)
    }
}

/// The outcome of a completed run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// The generation during which an optimal individual was
    /// produced, or `None` if the generation cap was exhausted.
    pub solved_at: Option<usize>,
    /// Per-generation schema statistics. When an optimum was found
    /// the history is truncated to the solve generation; otherwise it
    /// spans the full generation cap.
    pub history: StatsHistory,
}

impl RunReport {
    /// Returns the generation at which an optimum was found, with 0
    /// signaling "not found within the cap". This mirrors the
    /// original experiment's reporting convention; prefer
    /// [`solved_at`](RunReport::solved_at) when the distinction
    /// between "not found" and "found during generation 0" matters.
    pub fn generations_to_solve(&self) -> usize {
        self.solved_at.unwrap_or(0)
    }
}
