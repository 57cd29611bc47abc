// Player stats loading.
//
// Reads the tab-separated export with columns
// `player_key, full_name, position, team, points`. The header row is skipped
// without checking its names; columns are taken by position.

use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::clean::read_clean;
use super::{error_line, LoadError};
use crate::position::PositionOrder;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Season projection for a single player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub player_key: String,
    pub full_name: String,
    /// Normalized position label.
    pub position: String,
    pub team: String,
    pub points: f64,
}

// ---------------------------------------------------------------------------
// Raw row (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawPlayerRow(String, String, String, String, f64);

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Parse player records from any reader. `source` names the input in errors.
///
/// Any malformed row aborts the load: a wrong column count, an unparsable or
/// non-finite `points` value.
pub fn load_players_from_reader<R: Read>(
    rdr: R,
    source: &str,
    order: &PositionOrder,
) -> Result<Vec<PlayerRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let mut players = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| row_error(source, e))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let RawPlayerRow(player_key, full_name, position, team, points) = record
            .deserialize(None)
            .map_err(|e| LoadError::InvalidRow {
                path: source.to_string(),
                line,
                message: e.to_string(),
            })?;

        if !points.is_finite() {
            return Err(LoadError::InvalidRow {
                path: source.to_string(),
                line,
                message: format!("non-finite points value for '{full_name}'"),
            });
        }
        if points < 0.0 {
            warn!("player '{}' has negative points ({})", full_name, points);
        }

        players.push(PlayerRecord {
            player_key,
            full_name,
            position: order.normalize(&position),
            team,
            points,
        });
    }

    Ok(players)
}

fn row_error(source: &str, err: csv::Error) -> LoadError {
    match error_line(&err) {
        Some(line) => LoadError::InvalidRow {
            path: source.to_string(),
            line,
            message: err.to_string(),
        },
        None => LoadError::Csv {
            path: source.to_string(),
            source: err,
        },
    }
}

/// Load player records from a TSV file, stripping NUL bytes first.
pub fn load_players(path: &Path, order: &PositionOrder) -> Result<Vec<PlayerRecord>, LoadError> {
    let bytes = read_clean(path)?;
    let players = load_players_from_reader(bytes.as_slice(), &path.display().to_string(), order)?;
    info!("Loaded {} players from {}", players.len(), path.display());
    Ok(players)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
