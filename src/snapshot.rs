//! JSON snapshot of `{progress, entries}`.
//!
//! The core itself keeps everything in memory; persistence is a collaborator
//! concern. A loaded snapshot is re-validated against the immutable catalogue
//! before any state is hydrated: unknown ids or duplicate dates fail with
//! `CorruptState` rather than silently dropping data.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalogue::Catalogue;
use crate::engine::TrackerState;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Entry, UserProgress};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub progress: UserProgress,
    pub entries: Vec<Entry>,
}

impl Snapshot {
    pub fn capture(state: &TrackerState) -> Self {
        Self {
            progress: state.progress.clone(),
            entries: state.entries.values().cloned().collect(),
        }
    }

    /// Validates against the catalogue and rebuilds tracker state. All-or-
    /// nothing: the first bad record fails the whole load.
    pub fn into_state(self, catalogue: &Catalogue) -> TrackerResult<TrackerState> {
        for id in &self.progress.unlocked_achievements {
            if catalogue.achievement(id).is_none() {
                return Err(TrackerError::CorruptState(format!(
                    "unknown achievement id '{id}'"
                )));
            }
        }

        let mut entries = BTreeMap::new();
        for entry in self.entries {
            if catalogue.mood(&entry.mood_id).is_none() {
                return Err(TrackerError::CorruptState(format!(
                    "entry {} references unknown mood '{}'",
                    entry.date, entry.mood_id
                )));
            }
            let date = entry.date;
            if entries.insert(date, entry).is_some() {
                return Err(TrackerError::CorruptState(format!(
                    "duplicate entry for {date}"
                )));
            }
        }

        Ok(TrackerState {
            progress: self.progress,
            entries,
        })
    }

    pub fn save(&self, path: &Path) -> TrackerResult<()> {
        fs::write(path, serde_json::to_vec_pretty(self)?)?;
        tracing::debug!(path = %path.display(), entries = self.entries.len(), "snapshot saved");
        Ok(())
    }

    pub fn load(path: &Path) -> TrackerResult<Self> {
        let bytes = fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{check_in, CheckInRequest};
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn sample_state(catalogue: &Catalogue) -> TrackerState {
        let mut state = TrackerState::default();
        for (day, mood) in [(1, "happy"), (2, "sad"), (3, "very_happy")] {
            check_in(
                &mut state,
                catalogue,
                &CheckInRequest {
                    date: Some(d(day)),
                    mood_id: mood.into(),
                    note: Some(format!("day {day}")),
                },
            )
            .unwrap();
        }
        state
    }

    #[test]
    fn test_snapshot_round_trips_through_file() {
        let catalogue = Catalogue::builtin();
        let state = sample_state(&catalogue);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moodarc.json");

        Snapshot::capture(&state).save(&path).unwrap();
        let restored = Snapshot::load(&path).unwrap().into_state(&catalogue).unwrap();

        assert_eq!(restored.entries.len(), state.entries.len());
        assert_eq!(restored.progress.total_points, state.progress.total_points);
        assert_eq!(restored.progress.current_streak, state.progress.current_streak);
        assert_eq!(
            restored.progress.unlocked_achievements,
            state.progress.unlocked_achievements
        );
        assert_eq!(restored.entries[&d(2)].mood_id, "sad");
        assert_eq!(restored.entries[&d(2)].note.as_deref(), Some("day 2"));
    }

    #[test]
    fn test_unknown_mood_id_fails_load() {
        let catalogue = Catalogue::builtin();
        let mut snapshot = Snapshot::capture(&sample_state(&catalogue));
        snapshot.entries[0].mood_id = "euphoric".into();

        let err = snapshot.into_state(&catalogue).unwrap_err();
        assert!(matches!(err, TrackerError::CorruptState(msg) if msg.contains("euphoric")));
    }

    #[test]
    fn test_unknown_achievement_id_fails_load() {
        let catalogue = Catalogue::builtin();
        let mut snapshot = Snapshot::capture(&sample_state(&catalogue));
        snapshot.progress.unlocked_achievements.push("time_lord".into());

        let err = snapshot.into_state(&catalogue).unwrap_err();
        assert!(matches!(err, TrackerError::CorruptState(msg) if msg.contains("time_lord")));
    }

    #[test]
    fn test_duplicate_date_fails_load() {
        let catalogue = Catalogue::builtin();
        let mut snapshot = Snapshot::capture(&sample_state(&catalogue));
        let mut dup = snapshot.entries[0].clone();
        dup.mood_id = "neutral".into();
        snapshot.entries.push(dup);

        let err = snapshot.into_state(&catalogue).unwrap_err();
        assert!(matches!(err, TrackerError::CorruptState(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Snapshot::load(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, TrackerError::Io(_)));
    }
}
