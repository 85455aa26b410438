//! Read-only derivations over the entry history.
//!
//! Everything here is pure: callers pass the state in and get numbers back.
//! The rendering of these numbers (charts, calendar, garden) is someone
//! else's problem.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::catalogue::{Achievement, Catalogue, Mood};
use crate::models::{Entry, UserProgress};

/// Entries needed before summary insights are produced at all.
const MIN_ENTRIES_FOR_INSIGHTS: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct Insights {
    pub most_common_mood: Mood,
    /// Arithmetic mean of entry point values, 1.0 to 5.0.
    pub average_score: f64,
    /// Present only while a streak is live.
    pub streak_message: Option<String>,
}

/// Summary statistics, or `None` until there are at least three entries
/// (the presentation layer decides the empty-state message).
pub fn compute_insights(
    entries: &BTreeMap<NaiveDate, Entry>,
    progress: &UserProgress,
    catalogue: &Catalogue,
) -> Option<Insights> {
    if entries.len() < MIN_ENTRIES_FOR_INSIGHTS {
        return None;
    }

    // Counted in catalogue order so ties break toward the earlier-declared
    // mood, deterministically.
    let most_common_mood = catalogue
        .moods
        .iter()
        .map(|mood| {
            let count = entries.values().filter(|e| e.mood_id == mood.id).count();
            (mood, count)
        })
        .reduce(|best, candidate| if candidate.1 > best.1 { candidate } else { best })?
        .0
        .clone();

    let total: i64 = entries.values().map(|e| i64::from(e.points)).sum();
    let average_score = total as f64 / entries.len() as f64;

    let streak_message = (progress.current_streak > 0)
        .then(|| format!("You're on a {}-day tracking streak! 🔥", progress.current_streak));

    Some(Insights {
        most_common_mood,
        average_score,
        streak_message,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct MoodCount {
    pub mood_id: String,
    pub count: usize,
}

/// Per-mood entry counts in catalogue order; the numbers behind the pie
/// chart.
pub fn mood_distribution(entries: &BTreeMap<NaiveDate, Entry>, catalogue: &Catalogue) -> Vec<MoodCount> {
    catalogue
        .moods
        .iter()
        .map(|mood| MoodCount {
            mood_id: mood.id.clone(),
            count: entries.values().filter(|e| e.mood_id == mood.id).count(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPoints {
    pub date: NaiveDate,
    /// 0 for days with no entry.
    pub points: i32,
}

/// Points for the last seven days ending at `today`, oldest first; the
/// numbers behind the trend line.
pub fn weekly_trend(entries: &BTreeMap<NaiveDate, Entry>, today: NaiveDate) -> Vec<DayPoints> {
    (0..7)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            DayPoints {
                date,
                points: entries.get(&date).map_or(0, |e| e.points),
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelProgress {
    pub level: i32,
    pub title: String,
    pub total_points: i64,
    /// Threshold of the next level; `None` at max level.
    pub next_threshold: Option<i64>,
}

/// Progress toward the next level threshold, for the dashboard bar.
pub fn level_progress(progress: &UserProgress, catalogue: &Catalogue) -> LevelProgress {
    let current = catalogue
        .level(progress.current_level)
        .unwrap_or(&catalogue.levels[0]);
    let next_threshold = catalogue
        .levels
        .iter()
        .find(|l| l.level == current.level + 1)
        .map(|l| l.points_required);

    LevelProgress {
        level: current.level,
        title: current.title.clone(),
        total_points: progress.total_points,
        next_threshold,
    }
}

/// The most recently unlocked achievements, up to `limit`, in unlock order.
pub fn recent_achievements<'a>(
    progress: &UserProgress,
    catalogue: &'a Catalogue,
    limit: usize,
) -> Vec<&'a Achievement> {
    let start = progress.unlocked_achievements.len().saturating_sub(limit);
    progress.unlocked_achievements[start..]
        .iter()
        .filter_map(|id| catalogue.achievement(id))
        .collect()
}
