// Draft results loading.
//
// The draft export is a header-driven CSV; only `pick`, `round`, `manager`,
// `player` and `pos` are read and any other column is ignored. Row order is
// the draft order and is kept as-is.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::clean::read_clean;
use super::{error_line, LoadError};
use crate::position::PositionOrder;

/// A single pick from the draft results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPickRecord {
    /// Overall pick number.
    pub pick: u32,
    pub round: u32,
    pub manager: String,
    /// Player name as the draft export spells it.
    pub player: String,
    /// Normalized position label.
    pub position: String,
}

#[derive(Debug, Deserialize)]
struct RawDraftRow {
    pick: u32,
    round: u32,
    manager: String,
    player: String,
    pos: String,
}

/// Parse draft picks from any reader, preserving row order.
pub fn load_picks_from_reader<R: Read>(
    rdr: R,
    source: &str,
    order: &PositionOrder,
) -> Result<Vec<DraftPickRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let mut picks = Vec::new();
    for result in reader.deserialize::<RawDraftRow>() {
        let raw = result.map_err(|e| match error_line(&e) {
            Some(line) => LoadError::InvalidRow {
                path: source.to_string(),
                line,
                message: e.to_string(),
            },
            None => LoadError::Csv {
                path: source.to_string(),
                source: e,
            },
        })?;

        picks.push(DraftPickRecord {
            pick: raw.pick,
            round: raw.round,
            manager: raw.manager,
            player: raw.player,
            position: order.normalize(&raw.pos),
        });
    }

    Ok(picks)
}

/// Load draft picks from a CSV file, stripping NUL bytes first.
pub fn load_picks(path: &Path, order: &PositionOrder) -> Result<Vec<DraftPickRecord>, LoadError> {
    let bytes = read_clean(path)?;
    let picks = load_picks_from_reader(bytes.as_slice(), &path.display().to_string(), order)?;
    info!("Loaded {} draft picks from {}", picks.len(), path.display());
    Ok(picks)
}
