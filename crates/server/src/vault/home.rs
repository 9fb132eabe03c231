//! The home-summary aggregate.

use serde::{Deserialize, Serialize};

use crate::database::models::{File, Note, NoteSummary};
use crate::database::Database;
use crate::vault::Result;

const RECENT_NOTES_LIMIT: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSummary {
    pub total_notes: i64,
    pub total_files: i64,
    pub storage_used: i64,
    pub storage_limit: i64,
    pub recent_notes: Vec<NoteSummary>,
}

/// Counts, storage usage, and the most recent notes for the caller.
pub async fn home_summary(db: &Database, user_id: &str, storage_limit: i64) -> Result<HomeSummary> {
    let total_notes = Note::count_for_user(user_id, db).await?;
    let total_files = File::count_for_user(user_id, db).await?;
    let storage_used = File::storage_used(user_id, db).await?;
    let recent_notes = Note::recent_for_user(user_id, RECENT_NOTES_LIMIT, db).await?;

    Ok(HomeSummary {
        total_notes,
        total_files,
        storage_used,
        storage_limit,
        recent_notes,
    })
}
