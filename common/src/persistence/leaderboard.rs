use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{StoreError, write_atomic};
use crate::log;

pub const MAX_LEADERBOARD_ENTRIES: usize = 5;

/// Shown when a submitted name has nothing left after sanitizing.
const PLACEHOLDER_NAME: &str = "Anonymous";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u32,
}

/// Keeps letters, digits and spaces, trims the rest away. An empty result
/// becomes the placeholder so the leaderboard never shows a blank line.
pub fn sanitize_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        PLACEHOLDER_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Loads the persisted leaderboard. An absent or unreadable file is an
/// empty leaderboard; a malformed one is logged and treated the same way.
pub fn load_leaderboard(path: &Path) -> Vec<ScoreEntry> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            log!("Failed to read leaderboard {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(entries) => entries,
        Err(e) => {
            log!("Leaderboard {} is malformed ({}), treating as empty", path.display(), e);
            Vec::new()
        }
    }
}

/// Sorts descending by score (stable, so equal scores keep their insertion
/// order), keeps the top 5, and writes atomically.
pub fn save_leaderboard(path: &Path, entries: &[ScoreEntry]) -> Result<(), StoreError> {
    let mut entries = entries.to_vec();
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(MAX_LEADERBOARD_ENTRIES);

    let serialized = serde_json::to_string_pretty(&entries)?;
    write_atomic(path, &serialized)?;
    Ok(())
}

pub fn record_score(path: &Path, name: &str, score: u32) -> Result<(), StoreError> {
    let mut entries = load_leaderboard(path);
    entries.push(ScoreEntry {
        name: sanitize_name(name),
        score,
    });
    save_leaderboard(path, &entries)
}

/// Drops all persisted scores, leaving an empty-but-valid file behind.
pub fn reset_leaderboard(path: &Path) -> Result<(), StoreError> {
    match std::fs::remove_file(path) {
        Ok(()) => log!("Leaderboard {} reset", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    save_leaderboard(path, &[])
}
