// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation history log backing the AI context window.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rusqlite::params;

use handoff_core::{HandoffError, MessageRole, StoredMessage};

use crate::database::Database;
use crate::queries::conversations::parse_timestamp;

/// Append one turn to a user's conversation log. Returns the row id.
pub async fn append_message(
    db: &Database,
    user_id: &str,
    role: MessageRole,
    content: &str,
    response_id: Option<&str>,
    now: DateTime<Utc>,
) -> Result<i64, HandoffError> {
    let user_id = user_id.to_string();
    let content = content.to_string();
    let response_id = response_id.map(|s| s.to_string());
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO messages (user_id, role, content, response_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![user_id, role.to_string(), content, response_id, now.to_rfc3339()],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The most recent `limit` turns for a user, oldest first.
pub async fn recent_messages(
    db: &Database,
    user_id: &str,
    limit: usize,
) -> Result<Vec<StoredMessage>, HandoffError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, role, content, response_id, created_at
                 FROM messages WHERE user_id = ?1
                 ORDER BY id DESC LIMIT ?2",
            )?;
            let rows = stmt.query_map(params![user_id, limit as i64], |row| {
                let role_raw: String = row.get(2)?;
                let role = MessageRole::from_str(&role_raw).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        2,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;
                let created_raw: String = row.get(5)?;
                Ok(StoredMessage {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    role,
                    content: row.get(3)?,
                    response_id: row.get(4)?,
                    created_at: parse_timestamp(&created_raw, 5)?,
                })
            })?;
            let mut messages = Vec::new();
            for row in rows {
                messages.push(row?);
            }
            // Query is newest-first for the LIMIT; callers want oldest-first.
            messages.reverse();
            Ok(messages)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// The continuation reference from the user's most recent AI turn that
/// produced one, if any.
pub async fn latest_response_id(
    db: &Database,
    user_id: &str,
) -> Result<Option<String>, HandoffError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT response_id FROM messages
                 WHERE user_id = ?1 AND role = 'assistant' AND response_id IS NOT NULL
                 ORDER BY id DESC LIMIT 1",
            )?;
            let result = stmt.query_row(params![user_id], |row| row.get(0));
            match result {
                Ok(id) => Ok(Some(id)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap()).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn append_and_window_ordering() {
        let (db, _dir) = setup_db().await;
        let now = Utc::now();

        for i in 0..5 {
            append_message(&db, "u1", MessageRole::User, &format!("q{i}"), None, now)
                .await
                .unwrap();
            append_message(&db, "u1", MessageRole::Assistant, &format!("a{i}"), None, now)
                .await
                .unwrap();
        }

        let window = recent_messages(&db, "u1", 4).await.unwrap();
        assert_eq!(window.len(), 4);
        // Oldest first within the window.
        assert_eq!(window[0].content, "q3");
        assert_eq!(window[1].content, "a3");
        assert_eq!(window[2].content, "q4");
        assert_eq!(window[3].content, "a4");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn window_is_per_user() {
        let (db, _dir) = setup_db().await;
        let now = Utc::now();

        append_message(&db, "u1", MessageRole::User, "mine", None, now).await.unwrap();
        append_message(&db, "u2", MessageRole::User, "theirs", None, now).await.unwrap();

        let window = recent_messages(&db, "u1", 10).await.unwrap();
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].content, "mine");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn latest_response_id_skips_turns_without_one() {
        let (db, _dir) = setup_db().await;
        let now = Utc::now();

        assert_eq!(latest_response_id(&db, "u1").await.unwrap(), None);

        append_message(&db, "u1", MessageRole::Assistant, "a1", Some("resp-1"), now)
            .await
            .unwrap();
        append_message(&db, "u1", MessageRole::Assistant, "a2", None, now)
            .await
            .unwrap();

        // The newest turn has no reference; the stored one still wins.
        assert_eq!(
            latest_response_id(&db, "u1").await.unwrap().as_deref(),
            Some("resp-1")
        );

        append_message(&db, "u1", MessageRole::Assistant, "a3", Some("resp-2"), now)
            .await
            .unwrap();
        assert_eq!(
            latest_response_id(&db, "u1").await.unwrap().as_deref(),
            Some("resp-2")
        );

        db.close().await.unwrap();
    }
}
