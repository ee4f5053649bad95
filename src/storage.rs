//! localStorage access for the one persisted value: ladder progress.
use thiserror::Error;

use crate::config::{LADDER_STORAGE_KEY, LadderRules};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("could not encode value: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage rejected the write")]
    Write,
}

fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|win| win.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

/// Parses a stored JSON number; anything unreadable counts as a fresh start.
pub fn decode_ladder_progress(raw: &str) -> u8 {
    let goal = LadderRules::default().goal;
    serde_json::from_str::<i64>(raw)
        .ok()
        .map(|v| v.clamp(0, goal as i64) as u8)
        .unwrap_or(0)
}

/// JSON text written to storage; values above the goal are clamped.
pub fn encode_ladder_progress(progress: u8) -> Result<String, StorageError> {
    let goal = LadderRules::default().goal;
    Ok(serde_json::to_string(&progress.min(goal))?)
}

pub fn load_ladder_progress() -> u8 {
    match local_storage() {
        Ok(store) => match store.get_item(LADDER_STORAGE_KEY) {
            Ok(Some(raw)) => decode_ladder_progress(&raw),
            _ => 0,
        },
        Err(err) => {
            log::warn!("ladder progress not loaded: {err}");
            0
        }
    }
}

pub fn save_ladder_progress(progress: u8) -> Result<(), StorageError> {
    let store = local_storage()?;
    let encoded = encode_ladder_progress(progress)?;
    store
        .set_item(LADDER_STORAGE_KEY, &encoded)
        .map_err(|_| StorageError::Write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ClimbOutcome, Ladder};

    #[test]
    fn decode_accepts_json_ints_and_clamps() {
        assert_eq!(decode_ladder_progress("7"), 7);
        assert_eq!(decode_ladder_progress("0"), 0);
        assert_eq!(decode_ladder_progress("99"), 20);
        assert_eq!(decode_ladder_progress("-3"), 0);
        assert_eq!(decode_ladder_progress("\"seven\""), 0);
        assert_eq!(decode_ladder_progress(""), 0);
    }

    #[test]
    fn encode_writes_plain_json_ints() {
        assert_eq!(encode_ladder_progress(0).unwrap(), "0");
        assert_eq!(encode_ladder_progress(20).unwrap(), "20");
        assert_eq!(encode_ladder_progress(35).unwrap(), "20");
        assert_eq!(decode_ladder_progress(&encode_ladder_progress(13).unwrap()), 13);
    }

    #[test]
    fn fall_after_slow_climb_stores_zero() {
        let mut ladder = Ladder::new(LadderRules::default());
        assert!(matches!(ladder.climb(0.0), ClimbOutcome::Climbed { progress: 1, .. }));
        assert!(matches!(ladder.climb(500.0), ClimbOutcome::Climbed { progress: 2, .. }));
        assert!(matches!(ladder.climb(2000.0), ClimbOutcome::Fell(_)));
        assert_eq!(encode_ladder_progress(ladder.progress()).unwrap(), "0");
    }
}
