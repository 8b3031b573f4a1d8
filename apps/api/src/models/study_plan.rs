use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Display format for `generated_at`, e.g. `05 Mar 2025, 14:07`.
pub const GENERATED_AT_FORMAT: &str = "%d %b %Y, %H:%M";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudyPlanRow {
    pub id: Uuid,
    pub topic: String,
    pub plan: String,
    pub generated_at: DateTime<Utc>,
}

impl StudyPlanRow {
    /// A fresh record stamped with a new id and the current time.
    pub fn new(topic: impl Into<String>, plan: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            topic: topic.into(),
            plan: plan.into(),
            generated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StudyPlanResponse {
    pub id: Uuid,
    pub topic: String,
    pub plan: String,
    pub generated_at: String,
}

impl From<StudyPlanRow> for StudyPlanResponse {
    fn from(row: StudyPlanRow) -> Self {
        Self {
            id: row.id,
            topic: row.topic,
            plan: row.plan,
            generated_at: row.generated_at.format(GENERATED_AT_FORMAT).to_string(),
        }
    }
}
