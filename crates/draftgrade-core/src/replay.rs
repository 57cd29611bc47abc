// Draft replay: score every pick against the best player still available at
// its position, in draft order.
//
// For each pick:
// 1. Find the position bucket; skip the pick when it is absent or empty.
// 2. The baseline is the bucket's top player, unless the pick *is* that
//    player, in which case the runner-up is the baseline and the pick is
//    flagged as a best pick.
// 3. Picked points come from a case-insensitive lookup in the bucket; a
//    player without a projection scores zero.
// 4. differential = picked points - baseline points, added to the manager.
// 5. The picked player leaves the bucket, so later picks never see them.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::index::PositionIndex;
use crate::input::picks::DraftPickRecord;

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Result of looking up the picked player's own projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "points", rename_all = "snake_case")]
pub enum ProjectionLookup {
    Found(f64),
    /// No player with that name at the pick's position; scored as zero.
    Missing,
}

impl ProjectionLookup {
    pub fn points(&self) -> f64 {
        match self {
            ProjectionLookup::Found(points) => *points,
            ProjectionLookup::Missing => 0.0,
        }
    }
}

/// The player a pick is measured against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alternative {
    pub name: String,
    pub points: f64,
}

/// How the baseline for a pick was chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum Baseline {
    /// Someone other than the top player was picked; the top player is the baseline.
    Best(Alternative),
    /// The top player was picked; the runner-up is the baseline.
    RunnerUp(Alternative),
    /// The top player was picked and nobody else remains at the position.
    NoRunnerUp,
}

impl Baseline {
    pub fn was_best_pick(&self) -> bool {
        matches!(self, Baseline::RunnerUp(_) | Baseline::NoRunnerUp)
    }

    pub fn alternative(&self) -> Option<&Alternative> {
        match self {
            Baseline::Best(alt) | Baseline::RunnerUp(alt) => Some(alt),
            Baseline::NoRunnerUp => None,
        }
    }
}

/// Why a pick produced no comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No players (left) at the pick's position.
    EmptyPositionPool,
}

/// Scored comparison for a single pick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickComparison {
    pub manager: String,
    pub round: u32,
    pub pick: u32,
    pub player: String,
    pub position: String,
    pub picked: ProjectionLookup,
    /// `None` when the best player was picked with no runner-up left.
    pub alternative: Option<Alternative>,
    pub point_difference: f64,
    pub was_best_pick: bool,
}

impl PickComparison {
    /// Points of the baseline; equals the picked points when there is none.
    pub fn alternative_points(&self) -> f64 {
        self.alternative
            .as_ref()
            .map(|alt| alt.points)
            .unwrap_or_else(|| self.picked.points())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PickOutcome {
    Scored(PickComparison),
    Skipped(SkipReason),
}

// ---------------------------------------------------------------------------
// Manager ratings
// ---------------------------------------------------------------------------

/// Cumulative point differential per manager, in first-contribution order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PickRatings {
    totals: Vec<(String, f64)>,
    slots: HashMap<String, usize>,
}

impl PickRatings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `difference` to `manager`'s total, creating it at zero first.
    pub fn add(&mut self, manager: &str, difference: f64) {
        match self.slots.get(manager) {
            Some(&slot) => self.totals[slot].1 += difference,
            None => {
                self.slots.insert(manager.to_string(), self.totals.len());
                self.totals.push((manager.to_string(), difference));
            }
        }
    }

    pub fn get(&self, manager: &str) -> Option<f64> {
        self.slots.get(manager).map(|&slot| self.totals[slot].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals.iter().map(|(m, t)| (m.as_str(), *t))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

/// Counts of every recoverable condition met during a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    pub scored: usize,
    pub skipped_empty_pool: usize,
    pub missing_projections: usize,
    pub best_picks: usize,
    pub best_picks_without_runner_up: usize,
}

/// Everything a replay produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    pub comparisons: Vec<PickComparison>,
    pub ratings: PickRatings,
    pub stats: ReplayStats,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Replays a draft against a position index it owns.
///
/// The index is consumed pick by pick; replaying again needs a fresh index.
#[derive(Debug)]
pub struct DraftReplay {
    index: PositionIndex,
    ratings: PickRatings,
    stats: ReplayStats,
}

impl DraftReplay {
    pub fn new(index: PositionIndex) -> Self {
        DraftReplay {
            index,
            ratings: PickRatings::new(),
            stats: ReplayStats::default(),
        }
    }

    /// Players still available.
    pub fn remaining(&self) -> &PositionIndex {
        &self.index
    }

    pub fn ratings(&self) -> &PickRatings {
        &self.ratings
    }

    /// Score one pick and remove the picked player from the pool.
    pub fn apply(&mut self, pick: &DraftPickRecord) -> PickOutcome {
        let Some(best) = self.index.best(&pick.position) else {
            warn!(
                "pick {} ({}, {}): no players left at position {}, skipping",
                pick.pick, pick.player, pick.manager, pick.position
            );
            self.stats.skipped_empty_pool += 1;
            return PickOutcome::Skipped(SkipReason::EmptyPositionPool);
        };

        let baseline = if best.full_name == pick.player {
            match self.index.runner_up(&pick.position) {
                Some(next) => Baseline::RunnerUp(Alternative {
                    name: next.full_name.clone(),
                    points: next.points,
                }),
                None => Baseline::NoRunnerUp,
            }
        } else {
            Baseline::Best(Alternative {
                name: best.full_name.clone(),
                points: best.points,
            })
        };

        let picked = match self.index.find_points(&pick.position, &pick.player) {
            Some(points) => ProjectionLookup::Found(points),
            None => {
                debug!(
                    "pick {}: no projection for {} at {}, scoring as zero",
                    pick.pick, pick.player, pick.position
                );
                self.stats.missing_projections += 1;
                ProjectionLookup::Missing
            }
        };

        let point_difference = match baseline.alternative() {
            Some(alt) => picked.points() - alt.points,
            None => {
                warn!(
                    "pick {}: {} was the last {} available, no alternative to compare",
                    pick.pick, pick.player, pick.position
                );
                self.stats.best_picks_without_runner_up += 1;
                0.0
            }
        };
        if baseline.was_best_pick() {
            self.stats.best_picks += 1;
        }

        self.ratings.add(&pick.manager, point_difference);
        self.index.remove_named(&pick.position, &pick.player);
        self.stats.scored += 1;

        debug!(
            "pick {} round {}: {} took {} ({}), difference {:.2}",
            pick.pick, pick.round, pick.manager, pick.player, pick.position, point_difference
        );

        PickOutcome::Scored(PickComparison {
            manager: pick.manager.clone(),
            round: pick.round,
            pick: pick.pick,
            player: pick.player.clone(),
            position: pick.position.clone(),
            picked,
            was_best_pick: baseline.was_best_pick(),
            alternative: baseline.alternative().cloned(),
            point_difference,
        })
    }

    /// Replay every pick in order and return the full report.
    pub fn run<'a, I>(mut self, picks: I) -> ReplayReport
    where
        I: IntoIterator<Item = &'a DraftPickRecord>,
    {
        let mut comparisons = Vec::new();
        for pick in picks {
            if let PickOutcome::Scored(comparison) = self.apply(pick) {
                comparisons.push(comparison);
            }
        }

        info!(
            "Replayed draft: {} scored, {} skipped, {} missing projections, {} managers",
            self.stats.scored,
            self.stats.skipped_empty_pool,
            self.stats.missing_projections,
            self.ratings.len()
        );

        ReplayReport {
            comparisons,
            ratings: self.ratings,
            stats: self.stats,
        }
    }
}

/// Replay `picks` against `index`.
pub fn replay(index: PositionIndex, picks: &[DraftPickRecord]) -> ReplayReport {
    DraftReplay::new(index).run(picks)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
