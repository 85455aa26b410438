//! # MoodArc — gamified daily mood tracker core
//!
//! Users log one mood per calendar day and earn points, levels, streaks, and
//! achievements. This crate is the decision-making core: the progression
//! state machine, the insight calculator, and the static catalogue. Rendering
//! (calendars, charts, toasts) consumes the numbers produced here and lives
//! elsewhere.
//!
//! [`Tracker`] is the in-process call surface. State is a plain owned value;
//! everything runs synchronously with no locking.

pub mod catalogue;
pub mod config;
pub mod engine;
pub mod error;
pub mod insights;
pub mod models;
pub mod snapshot;

use chrono::Local;

pub use catalogue::Catalogue;
pub use engine::{CheckInOutcome, CheckInRequest, Notice, TrackerState};
pub use error::{TrackerError, TrackerResult};
pub use insights::Insights;
pub use models::{Entry, UserProgress};
pub use snapshot::Snapshot;

/// Owns the catalogue and the mutable tracker state, and exposes the
/// operations the presentation layer calls.
pub struct Tracker {
    catalogue: Catalogue,
    state: TrackerState,
}

impl Tracker {
    /// Fresh tracker with the built-in catalogue and empty history.
    pub fn new() -> Self {
        Self {
            catalogue: Catalogue::builtin(),
            state: TrackerState::default(),
        }
    }

    /// Rehydrates from a snapshot, re-validating it against the catalogue.
    pub fn from_snapshot(snapshot: Snapshot) -> TrackerResult<Self> {
        let catalogue = Catalogue::builtin();
        let state = snapshot.into_state(&catalogue)?;
        Ok(Self { catalogue, state })
    }

    pub fn check_in(&mut self, request: &CheckInRequest) -> TrackerResult<CheckInOutcome> {
        engine::check_in(&mut self.state, &self.catalogue, request)
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn progress(&self) -> &UserProgress {
        &self.state.progress
    }

    /// Entries in date order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.state.entries.values()
    }

    pub fn entry_for(&self, date: chrono::NaiveDate) -> Option<&Entry> {
        self.state.entries.get(&date)
    }

    pub fn insights(&self) -> Option<Insights> {
        insights::compute_insights(&self.state.entries, &self.state.progress, &self.catalogue)
    }

    pub fn mood_distribution(&self) -> Vec<insights::MoodCount> {
        insights::mood_distribution(&self.state.entries, &self.catalogue)
    }

    pub fn weekly_trend(&self) -> Vec<insights::DayPoints> {
        insights::weekly_trend(&self.state.entries, Local::now().date_naive())
    }

    pub fn level_progress(&self) -> insights::LevelProgress {
        insights::level_progress(&self.state.progress, &self.catalogue)
    }

    pub fn recent_achievements(&self, limit: usize) -> Vec<&catalogue::Achievement> {
        insights::recent_achievements(&self.state.progress, &self.catalogue, limit)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }
}

impl Default for Tracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn req(day: u32, mood: &str) -> CheckInRequest {
        CheckInRequest {
            date: Some(d(day)),
            mood_id: mood.into(),
            note: None,
        }
    }

    #[test]
    fn test_tracker_round_trip_through_snapshot() {
        let mut tracker = Tracker::new();
        tracker.check_in(&req(3, "happy")).unwrap();
        tracker.check_in(&req(1, "sad")).unwrap();
        tracker.check_in(&req(2, "neutral")).unwrap();

        // Date order regardless of check-in order.
        let dates: Vec<_> = tracker.entries().map(|e| e.date).collect();
        assert_eq!(dates, [d(1), d(2), d(3)]);

        let restored = Tracker::from_snapshot(tracker.snapshot()).unwrap();
        assert_eq!(restored.progress().total_points, tracker.progress().total_points);
        assert_eq!(restored.entries().count(), 3);
    }

    #[test]
    fn test_catalogue_untouched_by_checkins() {
        let mut tracker = Tracker::new();
        let before = serde_json::to_value(tracker.catalogue()).unwrap();
        for day in 1..=10 {
            tracker.check_in(&req(day, "very_happy")).unwrap();
        }
        let after = serde_json::to_value(tracker.catalogue()).unwrap();
        assert_eq!(before, after);
    }
}
