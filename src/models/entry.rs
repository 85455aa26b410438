use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One day's mood log. The `date` is the identity: the tracker holds at most
/// one entry per calendar day, and a same-day re-check-in replaces the whole
/// record rather than merging fields into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub mood_id: String,
    pub note: Option<String>,
    /// Copied from the mood at creation time.
    pub points: i32,
    pub created_at: DateTime<Utc>,
}
