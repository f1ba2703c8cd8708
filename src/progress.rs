//! Level progress bookkeeping
//!
//! The simulation reports each completed level to a [`ProgressSink`].
//! [`ProgressBook`] is the in-memory implementation: per-level best times,
//! unlock state and perfect-run counts. Storage formats live elsewhere.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Receives one call per completed level
pub trait ProgressSink {
    /// Returns false if the completion could not be recorded. The caller
    /// never rolls back simulation state on failure.
    fn record_completion(
        &mut self,
        level_id: u32,
        deaths: u32,
        elapsed_seconds: u32,
        perfect: bool,
    ) -> bool;
}

impl<T: ProgressSink + ?Sized> ProgressSink for Box<T> {
    fn record_completion(
        &mut self,
        level_id: u32,
        deaths: u32,
        elapsed_seconds: u32,
        perfect: bool,
    ) -> bool {
        (**self).record_completion(level_id, deaths, elapsed_seconds, perfect)
    }
}

/// Aggregated results for one level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStats {
    pub completions: u32,
    /// Fastest completion (seconds)
    pub best_time: u32,
    pub lowest_deaths: u32,
    pub total_deaths: u32,
    pub total_time: u32,
    /// Completions without a single death
    pub perfect_runs: u32,
}

impl LevelStats {
    fn first(deaths: u32, time: u32, perfect: bool) -> Self {
        Self {
            completions: 1,
            best_time: time,
            lowest_deaths: deaths,
            total_deaths: deaths,
            total_time: time,
            perfect_runs: u32::from(perfect),
        }
    }

    fn add(&mut self, deaths: u32, time: u32, perfect: bool) {
        self.completions += 1;
        self.best_time = self.best_time.min(time);
        self.lowest_deaths = self.lowest_deaths.min(deaths);
        self.total_deaths += deaths;
        self.total_time += time;
        if perfect {
            self.perfect_runs += 1;
        }
    }
}

/// How a level appears on the selection screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelStatus {
    Locked,
    Available,
    Completed,
}

/// In-memory progress for a single player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressBook {
    /// Highest unlocked level id (1-based)
    pub current_level: u32,
    pub completed: BTreeSet<u32>,
    pub stats: BTreeMap<u32, LevelStats>,
}

impl Default for ProgressBook {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressBook {
    /// Fresh book: only level 1 unlocked
    pub fn new() -> Self {
        Self {
            current_level: 1,
            completed: BTreeSet::new(),
            stats: BTreeMap::new(),
        }
    }

    pub fn stats(&self, level_id: u32) -> Option<&LevelStats> {
        self.stats.get(&level_id)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Levels finished at least once without dying
    pub fn perfect_levels(&self) -> usize {
        self.stats.values().filter(|s| s.perfect_runs > 0).count()
    }

    /// Whether the level at 0-based `index` can be played
    pub fn is_unlocked(&self, index: usize) -> bool {
        index == 0 || index < self.current_level as usize
    }

    pub fn level_status(&self, index: usize) -> LevelStatus {
        let level_id = index as u32 + 1;
        if self.completed.contains(&level_id) {
            LevelStatus::Completed
        } else if self.is_unlocked(index) {
            LevelStatus::Available
        } else {
            LevelStatus::Locked
        }
    }
}

impl ProgressSink for ProgressBook {
    fn record_completion(
        &mut self,
        level_id: u32,
        deaths: u32,
        elapsed_seconds: u32,
        perfect: bool,
    ) -> bool {
        if level_id == 0 {
            return false;
        }

        self.stats
            .entry(level_id)
            .and_modify(|s| s.add(deaths, elapsed_seconds, perfect))
            .or_insert_with(|| LevelStats::first(deaths, elapsed_seconds, perfect));

        if self.completed.insert(level_id) {
            log::info!("Level {} completed for the first time", level_id);
        }

        // Completing the frontier level unlocks the next one
        if level_id >= self.current_level {
            self.current_level = level_id + 1;
        }

        true
    }
}
