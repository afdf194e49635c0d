// SPDX-FileCopyrightText: 2026 Handoff Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The deduplication gate: insert-once admission of event ids.
//!
//! The upstream transport redelivers events on slow responses, possibly
//! overlapping in time. A read-then-write check has a race window, so
//! admission is a single atomic INSERT against the primary key on
//! `processed_events.event_id`; the uniqueness violation IS the duplicate
//! signal.

use chrono::{DateTime, Utc};
use rusqlite::params;

use handoff_core::{AdmitOutcome, HandoffError};

use crate::database::Database;

/// Attempt to admit an event id into the pipeline.
///
/// Returns [`AdmitOutcome::Admitted`] exactly once per event id; every
/// later (or concurrent) call for the same id observes
/// [`AdmitOutcome::Duplicate`].
pub async fn admit(
    db: &Database,
    event_id: &str,
    now: DateTime<Utc>,
) -> Result<AdmitOutcome, HandoffError> {
    let event_id = event_id.to_string();
    db.connection()
        .call(move |conn| {
            let result = conn.execute(
                "INSERT INTO processed_events (event_id, processed_at) VALUES (?1, ?2)",
                params![event_id, now.to_rfc3339()],
            );
            match result {
                Ok(_) => Ok(AdmitOutcome::Admitted),
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Ok(AdmitOutcome::Duplicate)
                }
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
    async fn first_admit_succeeds_second_is_duplicate() {
        let (db, _dir) = setup_db().await;
        let now = Utc::now();

        assert_eq!(admit(&db, "evt-1", now).await.unwrap(), AdmitOutcome::Admitted);
        assert_eq!(admit(&db, "evt-1", now).await.unwrap(), AdmitOutcome::Duplicate);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn distinct_event_ids_are_independent() {
        let (db, _dir) = setup_db().await;
        let now = Utc::now();

        assert_eq!(admit(&db, "evt-a", now).await.unwrap(), AdmitOutcome::Admitted);
        assert_eq!(admit(&db, "evt-b", now).await.unwrap(), AdmitOutcome::Admitted);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn concurrent_admits_admit_exactly_once() {
        let (db, _dir) = setup_db().await;
        let now = Utc::now();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let db = db.clone();
            handles.push(tokio::spawn(async move {
                admit(&db, "evt-race", now).await.unwrap()
            }));
        }

        let mut admitted = 0;
        for handle in handles {
            if handle.await.unwrap() == AdmitOutcome::Admitted {
                admitted += 1;
            }
        }
        assert_eq!(admitted, 1, "exactly one concurrent delivery may be admitted");

        db.close().await.unwrap();
    }
}
