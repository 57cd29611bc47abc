// Position ranking index: players grouped by position, best first.

use std::collections::HashMap;

use crate::input::players::PlayerRecord;
use crate::position::PositionOrder;

/// Remaining players per position, each bucket sorted descending by points.
///
/// Buckets only ever shrink, so the sort order established at build time
/// holds for the lifetime of the index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionIndex {
    buckets: HashMap<String, Vec<PlayerRecord>>,
    /// Canonical positions first (in canonical order), then others as first seen.
    order: Vec<String>,
}

impl PositionIndex {
    /// Group players by position and rank each group by points.
    ///
    /// The sort is stable: players with equal points keep their input order.
    pub fn build<I>(players: I, canonical: &PositionOrder) -> Self
    where
        I: IntoIterator<Item = PlayerRecord>,
    {
        let mut buckets: HashMap<String, Vec<PlayerRecord>> = HashMap::new();
        let mut extra_positions: Vec<String> = Vec::new();

        for player in players {
            if !canonical.contains(&player.position)
                && !buckets.contains_key(&player.position)
            {
                extra_positions.push(player.position.clone());
            }
            buckets
                .entry(player.position.clone())
                .or_default()
                .push(player);
        }

        for bucket in buckets.values_mut() {
            bucket.sort_by(|a, b| b.points.total_cmp(&a.points));
        }

        let order = canonical
            .tags()
            .iter()
            .filter(|tag| buckets.contains_key(tag.as_str()))
            .cloned()
            .chain(extra_positions)
            .collect();

        PositionIndex { buckets, order }
    }

    /// Remaining players at `position`, best first. Empty when none remain.
    pub fn bucket(&self, position: &str) -> &[PlayerRecord] {
        self.buckets.get(position).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Highest-ranked remaining player at `position`.
    pub fn best(&self, position: &str) -> Option<&PlayerRecord> {
        self.bucket(position).first()
    }

    /// Second-ranked remaining player at `position`.
    pub fn runner_up(&self, position: &str) -> Option<&PlayerRecord> {
        self.bucket(position).get(1)
    }

    /// Points of the first player at `position` whose name matches `name`
    /// ignoring case.
    pub fn find_points(&self, position: &str, name: &str) -> Option<f64> {
        let wanted = name.to_lowercase();
        self.bucket(position)
            .iter()
            .find(|p| p.full_name.to_lowercase() == wanted)
            .map(|p| p.points)
    }

    /// Drop every player at `position` whose full name is exactly `name`.
    /// Returns how many were removed.
    pub fn remove_named(&mut self, position: &str, name: &str) -> usize {
        match self.buckets.get_mut(position) {
            Some(bucket) => {
                let before = bucket.len();
                bucket.retain(|p| p.full_name != name);
                before - bucket.len()
            }
            None => 0,
        }
    }

    /// Positions present in the index, in deterministic order.
    pub fn positions(&self) -> &[String] {
        &self.order
    }

    /// Total number of players remaining across all positions.
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, position: &str, points: f64) -> PlayerRecord {
        PlayerRecord {
            player_key: format!("key.{name}"),
            full_name: name.into(),
            position: position.into(),
            team: "TST".into(),
            points,
        }
    }

    fn sample() -> Vec<PlayerRecord> {
        vec![
            player("RB Low", "RB", 10.0),
            player("WR Mid", "WR", 150.0),
            player("RB High", "RB", 30.0),
            player("LB Guy", "LB", 5.0),
            player("RB Mid", "RB", 20.0),
            player("QB One", "QB", 300.0),
            player("WR Top", "WR", 200.0),
        ]
    }

    #[test]
    fn buckets_are_sorted_descending() {
        let index = PositionIndex::build(sample(), &PositionOrder::default());
        for pos in index.positions() {
            let bucket = index.bucket(pos);
            assert!(
                bucket.windows(2).all(|w| w[0].points >= w[1].points),
                "bucket {pos} not sorted"
            );
        }
        let names: Vec<&str> = index
            .bucket("RB")
            .iter()
            .map(|p| p.full_name.as_str())
            .collect();
        assert_eq!(names, vec!["RB High", "RB Mid", "RB Low"]);
    }

    #[test]
    fn no_players_dropped_or_duplicated() {
        let players = sample();
        let count = players.len();
        let index = PositionIndex::build(players, &PositionOrder::default());
        assert_eq!(index.len(), count);
        let summed: usize = index.positions().iter().map(|p| index.bucket(p).len()).sum();
        assert_eq!(summed, count);
    }

    #[test]
    fn ties_keep_input_order() {
        let players = vec![
            player("First", "TE", 50.0),
            player("Second", "TE", 50.0),
            player("Top", "TE", 80.0),
            player("Third", "TE", 50.0),
        ];
        let index = PositionIndex::build(players, &PositionOrder::default());
        let names: Vec<&str> = index
            .bucket("TE")
            .iter()
            .map(|p| p.full_name.as_str())
            .collect();
        assert_eq!(names, vec!["Top", "First", "Second", "Third"]);
    }

    #[test]
    fn positions_follow_canonical_then_first_seen() {
        let index = PositionIndex::build(sample(), &PositionOrder::default());
        assert_eq!(index.positions(), &["RB", "WR", "QB", "LB"]);
    }

    #[test]
    fn missing_position_is_empty() {
        let index = PositionIndex::build(sample(), &PositionOrder::default());
        assert!(index.bucket("K").is_empty());
        assert!(index.best("K").is_none());
        assert!(index.runner_up("K").is_none());
    }

    #[test]
    fn best_and_runner_up() {
        let index = PositionIndex::build(sample(), &PositionOrder::default());
        assert_eq!(index.best("WR").unwrap().full_name, "WR Top");
        assert_eq!(index.runner_up("WR").unwrap().full_name, "WR Mid");
        assert!(index.runner_up("QB").is_none());
    }

    #[test]
    fn find_points_ignores_case() {
        let index = PositionIndex::build(sample(), &PositionOrder::default());
        assert_eq!(index.find_points("RB", "rb mid"), Some(20.0));
        assert_eq!(index.find_points("RB", "RB MID"), Some(20.0));
        assert_eq!(index.find_points("WR", "RB Mid"), None);
    }

    #[test]
    fn remove_named_is_exact_and_keeps_order() {
        let mut index = PositionIndex::build(sample(), &PositionOrder::default());
        assert_eq!(index.remove_named("RB", "rb mid"), 0);
        assert_eq!(index.remove_named("RB", "RB Mid"), 1);
        let names: Vec<&str> = index
            .bucket("RB")
            .iter()
            .map(|p| p.full_name.as_str())
            .collect();
        assert_eq!(names, vec!["RB High", "RB Low"]);
        assert_eq!(index.remove_named("K", "Nobody"), 0);
    }

    #[test]
    fn remove_named_drops_all_duplicates() {
        let players = vec![
            player("Same Name", "WR", 90.0),
            player("Other", "WR", 80.0),
            player("Same Name", "WR", 70.0),
        ];
        let mut index = PositionIndex::build(players, &PositionOrder::default());
        assert_eq!(index.remove_named("WR", "Same Name"), 2);
        assert_eq!(index.bucket("WR").len(), 1);
    }

    #[test]
    fn empty_input_builds_empty_index() {
        let index = PositionIndex::build(Vec::new(), &PositionOrder::default());
        assert!(index.is_empty());
        assert!(index.positions().is_empty());
    }
}
