mod leaderboard;
mod save;

pub use leaderboard::{
    ScoreEntry, MAX_LEADERBOARD_ENTRIES, load_leaderboard, record_score, reset_leaderboard,
    sanitize_name, save_leaderboard,
};
pub use save::{SaveDocument, SavedPowerup, discard_save, load_game, save_game};

use std::path::Path;

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Malformed(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Malformed(e) => write!(f, "Malformed document: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Malformed(e)
    }
}

/// Writes through a sibling temp file and renames it over the target, so
/// an interrupted write can never leave a file that fails to parse.
fn write_atomic(path: &Path, contents: &str) -> Result<(), std::io::Error> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = std::path::PathBuf::from(tmp_name);

    std::fs::write(&tmp_path, contents)?;
    std::fs::rename(&tmp_path, path)
}
