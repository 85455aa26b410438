use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The single mutable aggregate for a user. Every counter here is monotonic
/// across check-ins except `current_streak`, which resets when a day is
/// missed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProgress {
    pub total_points: i64,
    pub current_level: i32,
    pub current_streak: i32,
    /// Counts distinct days only; same-day edits do not bump this.
    pub total_checkins: i64,
    /// Unlock order is preserved for "recent achievements" display.
    pub unlocked_achievements: Vec<String>,
    pub last_checkin_date: Option<NaiveDate>,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            total_points: 0,
            current_level: 1,
            current_streak: 0,
            total_checkins: 0,
            unlocked_achievements: Vec::new(),
            last_checkin_date: None,
        }
    }
}

impl UserProgress {
    pub fn has_achievement(&self, id: &str) -> bool {
        self.unlocked_achievements.iter().any(|a| a == id)
    }
}
