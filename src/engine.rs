//! Progression engine: the check-in state transition.
//!
//! All mutation of user state goes through [`check_in`], which takes the
//! owned [`TrackerState`] by `&mut` — there is no ambient global. A check-in
//! either fully succeeds or is rejected before anything is touched.

use std::collections::BTreeMap;

use chrono::{Duration, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::catalogue::Catalogue;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{Entry, UserProgress};

/// All mutable tracker state: the progress aggregate plus the per-day entry
/// log. The BTreeMap keeps entries ordered by date and enforces the
/// one-entry-per-day invariant structurally.
#[derive(Debug, Clone, Default)]
pub struct TrackerState {
    pub progress: UserProgress,
    pub entries: BTreeMap<NaiveDate, Entry>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CheckInRequest {
    /// Date to log for. Default: today in the local timezone.
    pub date: Option<NaiveDate>,
    pub mood_id: String,
    #[validate(length(max = 5000, message = "Note must be under 5000 characters"))]
    pub note: Option<String>,
}

/// Side effects of a check-in, in display order: at most one level-up first,
/// then unlocks in catalogue declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    LevelUp { level: i32, title: String },
    AchievementUnlocked { id: String, name: String, points: i64 },
}

#[derive(Debug, Clone)]
pub struct CheckInOutcome {
    pub entry: Entry,
    pub progress: UserProgress,
    pub notices: Vec<Notice>,
    /// False when an existing entry for the date was replaced.
    pub new_checkin: bool,
}

pub fn check_in(
    state: &mut TrackerState,
    catalogue: &Catalogue,
    request: &CheckInRequest,
) -> TrackerResult<CheckInOutcome> {
    request
        .validate()
        .map_err(|e| TrackerError::Validation(e.to_string()))?;

    let mood = catalogue
        .mood(&request.mood_id)
        .ok_or_else(|| TrackerError::InvalidMood(request.mood_id.clone()))?;

    let date = request.date.unwrap_or_else(|| Local::now().date_naive());

    let entry = Entry {
        id: Uuid::new_v4(),
        date,
        mood_id: mood.id.clone(),
        note: request.note.clone(),
        points: mood.points,
        created_at: Utc::now(),
    };

    // Whole-record replace on an existing date; edits do not count as a new
    // check-in and leave the streak alone.
    let new_checkin = state.entries.insert(date, entry.clone()).is_none();
    if new_checkin {
        state.progress.total_checkins += 1;
        update_streak(&mut state.progress, &state.entries, date);
    }

    // Same-day edits still add the new mood's points without subtracting the
    // old entry's, matching the original scoring.
    state.progress.total_points += i64::from(mood.points);
    state.progress.last_checkin_date = Some(date);

    let mut notices = Vec::new();
    notices.extend(recompute_level(&mut state.progress, catalogue));
    notices.extend(scan_achievements(&mut state.progress, catalogue));

    tracing::info!(
        date = %date,
        mood = %mood.id,
        new_checkin,
        total_points = state.progress.total_points,
        streak = state.progress.current_streak,
        "check-in recorded"
    );

    Ok(CheckInOutcome {
        entry,
        progress: state.progress.clone(),
        notices,
        new_checkin,
    })
}

/// Streak rule, evaluated only for a genuinely new check-in: an entry on the
/// previous day continues the streak, anything else starts over at 1. The
/// first check-in after a gap of any length therefore resets to 1.
fn update_streak(progress: &mut UserProgress, entries: &BTreeMap<NaiveDate, Entry>, date: NaiveDate) {
    let yesterday = date - Duration::days(1);
    if entries.contains_key(&yesterday) {
        progress.current_streak += 1;
    } else {
        progress.current_streak = 1;
    }
}

/// Raises `current_level` to match `total_points` against the level table.
/// Levels never go down; points are never spent.
fn recompute_level(progress: &mut UserProgress, catalogue: &Catalogue) -> Option<Notice> {
    let reached = catalogue.level_for_points(progress.total_points);
    if reached.level <= progress.current_level {
        return None;
    }
    progress.current_level = reached.level;
    tracing::info!(level = reached.level, title = %reached.title, "level up");
    Some(Notice::LevelUp {
        level: reached.level,
        title: reached.title.clone(),
    })
}

/// Evaluates every still-locked achievement in catalogue order. Reward points
/// land on the total but are not re-fed into the level recompute or this scan
/// within the same check-in; a level-up earned purely from rewards shows up
/// on the next check-in.
fn scan_achievements(progress: &mut UserProgress, catalogue: &Catalogue) -> Vec<Notice> {
    let mut notices = Vec::new();
    for achievement in &catalogue.achievements {
        if progress.has_achievement(&achievement.id) {
            continue;
        }
        let Some(predicate) = unlock_predicate(&achievement.id) else {
            tracing::warn!(id = %achievement.id, "achievement has no unlock rule, skipping");
            continue;
        };
        if predicate(progress) {
            progress.unlocked_achievements.push(achievement.id.clone());
            progress.total_points += achievement.points;
            tracing::info!(id = %achievement.id, points = achievement.points, "achievement unlocked");
            notices.push(Notice::AchievementUnlocked {
                id: achievement.id.clone(),
                name: achievement.name.clone(),
                points: achievement.points,
            });
        }
    }
    notices
}

pub type UnlockPredicate = fn(&UserProgress) -> bool;

/// Closed rule table mapping achievement ids to their unlock predicates.
/// `Catalogue::validate` checks that every declared achievement has a rule
/// here.
pub fn unlock_predicate(id: &str) -> Option<UnlockPredicate> {
    let predicate: UnlockPredicate = match id {
        "first_checkin" => |p| p.total_checkins >= 1,
        "streak_7" => |p| p.current_streak >= 7,
        "streak_30" => |p| p.current_streak >= 30,
        "level_5" => |p| p.current_level >= 5,
        "mood_master" => |p| p.total_checkins >= 100,
        _ => return None,
    };
    Some(predicate)
}
