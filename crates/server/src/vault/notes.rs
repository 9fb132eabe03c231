//! Note lifecycle operations.

use uuid::Uuid;

use crate::database::models::{Note, NoteSummary};
use crate::database::Database;
use crate::guard::{self, Deny};
use crate::vault::{Result, VaultError};

/// Create a note owned by `user_id`. Content defaults to empty.
pub async fn create_note(
    db: &Database,
    user_id: &str,
    title: &str,
    content: Option<&str>,
) -> Result<Note> {
    let title = title.trim();
    if title.is_empty() {
        return Err(VaultError::Validation("Title required".into()));
    }

    let note = Note::create(user_id, title, content.unwrap_or(""), db).await?;
    tracing::debug!(note_id = %note.id, "note created");
    Ok(note)
}

/// Overwrite a note's title and content, advancing its modification time.
///
/// The write is a single statement scoped by `(id, user_id)`; when it
/// matches nothing the failure is classified with a follow-up read.
pub async fn update_note(
    db: &Database,
    user_id: &str,
    id: Uuid,
    title: &str,
    content: &str,
) -> Result<Note> {
    let title = title.trim();
    if title.is_empty() {
        return Err(VaultError::Validation("Title required".into()));
    }

    if !Note::update_owned(id, user_id, title, content, db).await? {
        return Err(classify_miss(db, user_id, id).await?);
    }

    Note::get(id, db).await?.ok_or(VaultError::NotFound)
}

/// Hard-delete a note. Deleting an absent id yields NotFound, never a crash.
pub async fn delete_note(db: &Database, user_id: &str, id: Uuid) -> Result<()> {
    if !Note::delete_owned(id, user_id, db).await? {
        return Err(classify_miss(db, user_id, id).await?);
    }
    tracing::debug!(note_id = %id, "note deleted");
    Ok(())
}

/// List the caller's notes, optionally filtered by substring query.
pub async fn list_notes(db: &Database, user_id: &str, query: Option<&str>) -> Result<Vec<Note>> {
    Ok(Note::list_for_user(user_id, query, db).await?)
}

/// The caller's most recently modified notes, id + title only.
pub async fn recent_notes(db: &Database, user_id: &str, limit: u32) -> Result<Vec<NoteSummary>> {
    Ok(Note::recent_for_user(user_id, limit, db).await?)
}

/// A conditional write matched no row: decide NotFound vs Forbidden.
///
/// The read happens after the (failed) mutation, so it only refines the
/// error; there is no window in which the mutation itself could race.
async fn classify_miss(
    db: &Database,
    user_id: &str,
    id: Uuid,
) -> std::result::Result<VaultError, sqlx::Error> {
    let note = Note::get(id, db).await?;
    Ok(match guard::authorize(Some(user_id), note.as_ref()) {
        Err(deny) => deny.into(),
        // The row appeared under our ownership between the two statements;
        // report the mutation's view.
        Ok(()) => Deny::NotFound.into(),
    })
}
