// Library root: draft grading against the best available player at each pick.

pub mod config;
pub mod index;
pub mod input;
pub mod position;
pub mod replay;
pub mod report;

use std::path::Path;

use index::PositionIndex;
use input::LoadError;
use position::PositionOrder;
use replay::ReplayReport;

/// Load both input files, build the index and replay the draft.
pub fn grade_files(
    players_path: &Path,
    draft_path: &Path,
    order: &PositionOrder,
) -> Result<ReplayReport, LoadError> {
    let players = input::players::load_players(players_path, order)?;
    let picks = input::picks::load_picks(draft_path, order)?;
    let index = PositionIndex::build(players, order);
    Ok(replay::replay(index, &picks))
}
