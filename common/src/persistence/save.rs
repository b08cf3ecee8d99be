use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{StoreError, write_atomic};

/// The single save slot, exactly as it appears on disk. Positions are
/// `[x, y]` cell pairs; `direction` is a unit cell delta. Turning this
/// into live session state (and validating it) is the game loop's job.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveDocument {
    pub snake: Vec<(usize, usize)>,
    pub direction: (i32, i32),
    pub food_pos: (usize, usize),
    pub food_skin_idx: usize,
    pub obstacles: Vec<(usize, usize)>,
    pub powerups: Vec<SavedPowerup>,
    pub score: u32,
    pub powerup_active: Option<String>,
    pub powerup_timer: u32,
    pub snake_skin_idx: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedPowerup {
    pub pos: (usize, usize),
    #[serde(rename = "type")]
    pub kind: String,
}

/// Overwrites the save slot. There is exactly one slot; no confirmation,
/// no versioning.
pub fn save_game(path: &Path, doc: &SaveDocument) -> Result<(), StoreError> {
    let serialized = serde_json::to_string_pretty(doc)?;
    write_atomic(path, &serialized)?;
    Ok(())
}

/// Reads the save slot. `Ok(None)` means no save exists, which is not an
/// error; `Err(StoreError::Malformed)` means the file is unparseable and
/// the caller should discard it and proceed as if absent.
pub fn load_game(path: &Path) -> Result<Option<SaveDocument>, StoreError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let doc = serde_json::from_str(&content)?;
    Ok(Some(doc))
}

/// Removes the save slot; a slot that is already gone is fine.
pub fn discard_save(path: &Path) -> Result<(), StoreError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}
