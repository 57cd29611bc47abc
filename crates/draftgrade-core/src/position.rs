// Position labels and multi-position normalization.

use serde::{Deserialize, Serialize};

/// Canonical position tags in their default priority order.
pub const DEFAULT_CANONICAL: &[&str] = &["K", "TE", "RB", "WR", "QB", "DEF"];

/// Ordered list of canonical position tags.
///
/// The order matters twice: it decides which label wins when a player is
/// listed at several positions, and it fixes the iteration order of the
/// position index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionOrder(Vec<String>);

impl PositionOrder {
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PositionOrder(tags.into_iter().map(Into::into).collect())
    }

    pub fn tags(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `label` is one of the canonical tags.
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|t| t == label)
    }

    /// Normalize a raw position field against this order.
    pub fn normalize(&self, raw: &str) -> String {
        normalize(raw, &self.0)
    }
}

impl Default for PositionOrder {
    fn default() -> Self {
        PositionOrder::new(DEFAULT_CANONICAL.iter().copied())
    }
}

/// Resolve a possibly comma-joined position field to a single label.
///
/// With several listed labels, the first canonical tag (in canonical order)
/// found among them wins; if none is canonical, the first listed label is
/// kept. A single label is returned trimmed but otherwise untouched.
pub fn normalize<S: AsRef<str>>(raw: &str, canonical_order: &[S]) -> String {
    if !raw.contains(',') {
        return raw.trim().to_string();
    }

    let listed: Vec<&str> = raw.split(',').map(str::trim).collect();

    canonical_order
        .iter()
        .map(AsRef::<str>::as_ref)
        .find(|tag| listed.contains(tag))
        .or_else(|| listed.first().copied())
        .unwrap_or_default()
        .to_string()
}
