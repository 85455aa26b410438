use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use moodarc::config::Config;
use moodarc::{CheckInRequest, Notice, Snapshot, Tracker};

#[derive(Parser)]
#[command(name = "moodarc", about = "Gamified daily mood tracker", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log a mood for today (or a given date)
    Checkin {
        /// Mood id: very_happy, happy, neutral, sad, very_sad
        mood: String,
        /// Free-text note to attach
        #[arg(short, long)]
        note: Option<String>,
        /// Date to log for (YYYY-MM-DD), default today
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },
    /// Points, level, streak, and recent achievements
    Dashboard,
    /// Logged entries in date order
    Entries,
    /// Summary statistics over the entry history
    Insights,
    /// All achievements with unlock status
    Achievements,
    /// Print a wellness tip
    Tip,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodarc=warn".into()),
        )
        .init();

    let config = Config::from_env();
    let cli = Cli::parse();

    let mut tracker = if config.snapshot_path.exists() {
        let snapshot = Snapshot::load(&config.snapshot_path)
            .with_context(|| format!("reading {}", config.snapshot_path.display()))?;
        Tracker::from_snapshot(snapshot)?
    } else {
        Tracker::new()
    };

    match cli.command {
        Command::Checkin { mood, note, date } => {
            let outcome = tracker.check_in(&CheckInRequest {
                date,
                mood_id: mood,
                note,
            })?;
            if outcome.new_checkin {
                println!("Mood checked in for {} (+{} points)", outcome.entry.date, outcome.entry.points);
            } else {
                println!("Mood updated for {} (+{} points)", outcome.entry.date, outcome.entry.points);
            }
            for notice in &outcome.notices {
                match notice {
                    Notice::LevelUp { title, .. } => {
                        println!("Level up! You're now a {title}!");
                    }
                    Notice::AchievementUnlocked { name, points, .. } => {
                        println!("Achievement unlocked: {name} (+{points} points)");
                    }
                }
            }
            tracker
                .snapshot()
                .save(&config.snapshot_path)
                .with_context(|| format!("writing {}", config.snapshot_path.display()))?;
        }

        Command::Dashboard => {
            let progress = tracker.progress();
            let lp = tracker.level_progress();
            println!("Level {} — {}", lp.level, lp.title);
            match lp.next_threshold {
                Some(next) => println!("{}/{} points to next level", lp.total_points, next),
                None => println!("{} points — max level reached!", lp.total_points),
            }
            println!("Streak: {} day(s)", progress.current_streak);
            println!("Check-ins: {}", progress.total_checkins);
            let recent = tracker.recent_achievements(3);
            if !recent.is_empty() {
                println!("Recent achievements:");
                for a in recent {
                    println!("  {} {} — {}", a.icon, a.name, a.description);
                }
            }
        }

        Command::Entries => {
            for entry in tracker.entries() {
                let mood = tracker
                    .catalogue()
                    .mood(&entry.mood_id)
                    .map(|m| m.label.as_str())
                    .unwrap_or(entry.mood_id.as_str());
                match &entry.note {
                    Some(note) => println!("{}  {:<10} +{}  {}", entry.date, mood, entry.points, note),
                    None => println!("{}  {:<10} +{}", entry.date, mood, entry.points),
                }
            }
        }

        Command::Insights => match tracker.insights() {
            Some(insights) => {
                let mood = &insights.most_common_mood;
                println!("Your most common mood is {} {}", mood.emoji, mood.label);
                println!("Your average mood score is {:.1}/5.0", insights.average_score);
                if let Some(msg) = &insights.streak_message {
                    println!("{msg}");
                }
            }
            None => println!("Track more moods to see insights!"),
        },

        Command::Achievements => {
            for a in &tracker.catalogue().achievements {
                let status = if tracker.progress().has_achievement(&a.id) {
                    "unlocked"
                } else {
                    "locked"
                };
                println!("{} {} (+{}) [{}] — {}", a.icon, a.name, a.points, status, a.description);
            }
        }

        Command::Tip => {
            if let Some(tip) = tracker.catalogue().daily_tip() {
                println!("{tip}");
            }
        }
    }

    Ok(())
}
