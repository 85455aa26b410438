//! Static reference data: moods, achievements, levels, challenges, tips.
//!
//! The catalogue is built once at startup and never mutated. Every lookup
//! against it is expected to succeed in normal operation; `validate` exists
//! so the built-in tables are checked once rather than defended at each call.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::engine::unlock_predicate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mood {
    pub id: String,
    pub label: String,
    /// Points awarded per check-in, 1 (worst) to 5 (best).
    pub points: i32,
    pub emoji: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Bonus points granted when unlocked.
    pub points: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub level: i32,
    pub points_required: i64,
    pub title: String,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub reward: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Catalogue {
    pub moods: Vec<Mood>,
    pub achievements: Vec<Achievement>,
    /// Ascending by `points_required`; the first entry is the starting level.
    pub levels: Vec<Level>,
    pub challenges: Vec<Challenge>,
    pub tips: Vec<String>,
}

impl Catalogue {
    pub fn builtin() -> Self {
        let catalogue = Self {
            moods: vec![
                mood("very_happy", "Very Happy", 5, "😄", "#4CAF50"),
                mood("happy", "Happy", 4, "😊", "#8BC34A"),
                mood("neutral", "Neutral", 3, "😐", "#9E9E9E"),
                mood("sad", "Sad", 2, "😟", "#FF9800"),
                mood("very_sad", "Very Sad", 1, "😢", "#F44336"),
            ],
            achievements: vec![
                achievement("first_checkin", "First Steps", "Complete your first mood check-in", "🎯", 10),
                achievement("streak_7", "Week Warrior", "Maintain a 7-day streak", "🔥", 50),
                achievement("streak_30", "Monthly Master", "Maintain a 30-day streak", "👑", 200),
                achievement("level_5", "Rising Star", "Reach level 5", "⭐", 100),
                achievement("mood_master", "Mood Master", "Complete 100 check-ins", "🧘", 500),
            ],
            levels: vec![
                level(1, 0, "Beginner", "#E3F2FD"),
                level(2, 50, "Explorer", "#BBDEFB"),
                level(3, 150, "Tracker", "#90CAF9"),
                level(4, 300, "Analyst", "#64B5F6"),
                level(5, 500, "Master", "#42A5F5"),
            ],
            challenges: vec![
                challenge("positive_week", "Positive Week", "Log happy moods for 3 days this week", 30),
                challenge("consistency", "Consistency Champion", "Check in every day this week", 50),
                challenge("reflection", "Reflective Soul", "Add notes to 5 mood entries", 25),
            ],
            tips: [
                "Remember that all emotions are valid and temporary",
                "Try deep breathing when feeling overwhelmed",
                "Celebrate small wins and progress",
                "Consider what activities make you feel better",
                "Tracking patterns can help identify triggers",
            ]
            .map(String::from)
            .to_vec(),
        };
        debug_assert!(catalogue.validate().is_ok(), "built-in catalogue is invalid");
        catalogue
    }

    /// Structural checks on the reference tables. A failure here is a
    /// programming error, not a runtime condition.
    pub fn validate(&self) -> Result<(), String> {
        for (i, mood) in self.moods.iter().enumerate() {
            if !(1..=5).contains(&mood.points) {
                return Err(format!("mood '{}' has out-of-range points {}", mood.id, mood.points));
            }
            if self.moods[..i].iter().any(|m| m.id == mood.id) {
                return Err(format!("duplicate mood id '{}'", mood.id));
            }
        }

        for (i, a) in self.achievements.iter().enumerate() {
            if unlock_predicate(&a.id).is_none() {
                return Err(format!("achievement '{}' has no unlock rule", a.id));
            }
            if self.achievements[..i].iter().any(|other| other.id == a.id) {
                return Err(format!("duplicate achievement id '{}'", a.id));
            }
        }

        if self.levels.is_empty() {
            return Err("level table is empty".into());
        }
        if self.levels[0].points_required != 0 {
            return Err("first level must require 0 points".into());
        }
        for pair in self.levels.windows(2) {
            if pair[1].points_required <= pair[0].points_required || pair[1].level <= pair[0].level {
                return Err(format!("level table not ascending at level {}", pair[1].level));
            }
        }

        Ok(())
    }

    pub fn mood(&self, id: &str) -> Option<&Mood> {
        self.moods.iter().find(|m| m.id == id)
    }

    pub fn achievement(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id == id)
    }

    pub fn level(&self, number: i32) -> Option<&Level> {
        self.levels.iter().find(|l| l.level == number)
    }

    /// Highest level whose threshold is within `total_points`. The table is
    /// ascending, so the last qualifying row wins.
    pub fn level_for_points(&self, total_points: i64) -> &Level {
        self.levels
            .iter()
            .rev()
            .find(|l| total_points >= l.points_required)
            .unwrap_or(&self.levels[0])
    }

    pub fn daily_tip(&self) -> Option<&str> {
        self.tips.choose(&mut rand::thread_rng()).map(String::as_str)
    }
}

fn mood(id: &str, label: &str, points: i32, emoji: &str, color: &str) -> Mood {
    Mood {
        id: id.into(),
        label: label.into(),
        points,
        emoji: emoji.into(),
        color: color.into(),
    }
}

fn achievement(id: &str, name: &str, description: &str, icon: &str, points: i64) -> Achievement {
    Achievement {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        icon: icon.into(),
        points,
    }
}

fn level(number: i32, points_required: i64, title: &str, color: &str) -> Level {
    Level {
        level: number,
        points_required,
        title: title.into(),
        color: color.into(),
    }
}

fn challenge(id: &str, name: &str, description: &str, reward: i64) -> Challenge {
    Challenge {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        reward,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalogue_is_valid() {
        assert_eq!(Catalogue::builtin().validate(), Ok(()));
    }

    #[test]
    fn test_every_achievement_has_an_unlock_rule() {
        for a in &Catalogue::builtin().achievements {
            assert!(unlock_predicate(&a.id).is_some(), "no rule for {}", a.id);
        }
    }

    #[test]
    fn test_level_for_points_boundaries() {
        let catalogue = Catalogue::builtin();
        assert_eq!(catalogue.level_for_points(0).level, 1);
        assert_eq!(catalogue.level_for_points(49).level, 1);
        assert_eq!(catalogue.level_for_points(50).level, 2);
        assert_eq!(catalogue.level_for_points(149).level, 2);
        assert_eq!(catalogue.level_for_points(150).level, 3);
        assert_eq!(catalogue.level_for_points(500).level, 5);
        assert_eq!(catalogue.level_for_points(10_000).level, 5);
    }

    #[test]
    fn test_validate_rejects_unsorted_levels() {
        let mut catalogue = Catalogue::builtin();
        catalogue.levels.swap(1, 2);
        assert!(catalogue.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_achievement_rule() {
        let mut catalogue = Catalogue::builtin();
        catalogue
            .achievements
            .push(achievement("mystery", "Mystery", "No rule exists for this", "❓", 1));
        assert!(catalogue.validate().is_err());
    }
}
