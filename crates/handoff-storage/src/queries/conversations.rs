// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation state CRUD: the sole source of truth for handover state.

use chrono::{DateTime, Utc};
use rusqlite::params;

use handoff_core::{ConversationState, HandoffError};

use crate::database::Database;

/// Get the conversation state for a user.
///
/// An unknown user yields the fresh sentinel state (AI mode, no
/// timestamp) rather than an error -- a brand-new conversation is
/// implicitly AI-controlled.
pub async fn get_conversation(
    db: &Database,
    user_id: &str,
) -> Result<ConversationState, HandoffError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT user_id, nickname, human_mode, last_human_at
                 FROM conversations WHERE user_id = ?1",
            )?;
            let result = stmt.query_row(params![user_id], |row| {
                let last_human_at: Option<String> = row.get(3)?;
                let last_human_at = last_human_at
                    .map(|raw| parse_timestamp(&raw, 3))
                    .transpose()?;
                Ok(ConversationState {
                    user_id: row.get(0)?,
                    nickname: row.get(1)?,
                    human_mode: row.get::<_, i64>(2)? != 0,
                    last_human_at,
                })
            });
            match result {
                Ok(state) => Ok(state),
                Err(rusqlite::Error::QueryReturnedNoRows) => {
                    Ok(ConversationState::fresh(&user_id))
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Record a (re)triggered handover: create-or-update the user's row with
/// human mode set and a refreshed timestamp.
///
/// A `None` nickname keeps whatever was stored before; a `Some` value
/// replaces it.
pub async fn upsert_handover(
    db: &Database,
    user_id: &str,
    nickname: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(), HandoffError> {
    let user_id = user_id.to_string();
    let nickname = nickname.map(|s| s.to_string());
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO conversations (user_id, nickname, human_mode, last_human_at, updated_at)
                 VALUES (?1, ?2, 1, ?3, ?3)
                 ON CONFLICT(user_id) DO UPDATE SET
                     nickname = COALESCE(excluded.nickname, nickname),
                     human_mode = 1,
                     last_human_at = excluded.last_human_at,
                     updated_at = excluded.updated_at",
                params![user_id, nickname, now.to_rfc3339()],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Revert control to AI after the handover timeout elapsed.
///
/// Idempotent; the historical `last_human_at` value is kept.
pub async fn clear_human_mode(
    db: &Database,
    user_id: &str,
    now: DateTime<Utc>,
) -> Result<(), HandoffError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE conversations SET human_mode = 0, updated_at = ?2 WHERE user_id = ?1",
                params![user_id, now.to_rfc3339()],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub(crate) fn parse_timestamp(
    raw: &str,
    column: usize,
) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}
