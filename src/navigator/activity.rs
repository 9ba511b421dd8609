//! Activity Timeline
//!
//! Append-only log of what happened in a user's sessions: sign-ins, goal
//! updates, generated paths, started and completed paths, sign-outs.

use super::storage::StoreError;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

// ============================================================
// ACTIVITY EVENT TYPES
// ============================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    SignedIn,
    GoalsUpdated,
    PathsGenerated,
    PathStarted,
    PathCompleted,
    SignedOut,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::SignedIn => "signed_in",
            ActivityKind::GoalsUpdated => "goals_updated",
            ActivityKind::PathsGenerated => "paths_generated",
            ActivityKind::PathStarted => "path_started",
            ActivityKind::PathCompleted => "path_completed",
            ActivityKind::SignedOut => "signed_out",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "signed_in" => Some(ActivityKind::SignedIn),
            "goals_updated" => Some(ActivityKind::GoalsUpdated),
            "paths_generated" => Some(ActivityKind::PathsGenerated),
            "path_started" => Some(ActivityKind::PathStarted),
            "path_completed" => Some(ActivityKind::PathCompleted),
            "signed_out" => Some(ActivityKind::SignedOut),
            _ => None,
        }
    }
}

/// A single entry in the timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub kind: ActivityKind,
    pub description: String,
    pub metadata: Option<serde_json::Value>,
}

impl ActivityEvent {
    pub fn new(user_id: &str, kind: ActivityKind, description: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            timestamp: Utc::now(),
            kind,
            description: description.to_string(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

// ============================================================
// ACTIVITY LOG (SQLite-backed)
// ============================================================

const ACTIVITY_SCHEMA: &str = "CREATE TABLE IF NOT EXISTS activity_events (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    user_id TEXT NOT NULL,
    timestamp TEXT NOT NULL,
    kind TEXT NOT NULL,
    description TEXT NOT NULL,
    metadata TEXT
)";

pub struct ActivityLog {
    conn: Arc<Mutex<Connection>>,
}

impl ActivityLog {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let log = Self::with_connection(Connection::open(path)?)?;
        {
            let conn = log.conn.lock().map_err(|_| StoreError::Poisoned)?;
            conn.execute(
                "CREATE INDEX IF NOT EXISTS idx_activity_user_id ON activity_events(user_id)",
                [],
            )?;
        }
        Ok(log)
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(ACTIVITY_SCHEMA, [])?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn record(&self, event: &ActivityEvent) -> Result<(), StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let metadata_json = event.metadata.as_ref().map(|m| m.to_string());

        conn.execute(
            "INSERT INTO activity_events (id, user_id, timestamp, kind, description, metadata)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                event.id,
                event.user_id,
                event.timestamp.to_rfc3339(),
                event.kind.as_str(),
                event.description,
                metadata_json,
            ],
        )?;

        Ok(())
    }

    /// All events for a user, oldest first
    pub fn timeline(&self, user_id: &str) -> Result<Vec<ActivityEvent>, StoreError> {
        let conn = self.conn.lock().map_err(|_| StoreError::Poisoned)?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, timestamp, kind, description, metadata
             FROM activity_events
             WHERE user_id = ?1
             ORDER BY seq ASC",
        )?;

        let rows = stmt.query_map([user_id], |row| {
            let timestamp: String = row.get(2)?;
            let kind: String = row.get(3)?;
            let metadata: Option<String> = row.get(5)?;
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                timestamp,
                kind,
                row.get::<_, String>(4)?,
                metadata,
            ))
        })?;

        let mut events = Vec::new();
        for row in rows {
            let (id, user_id, timestamp, kind, description, metadata) = row?;
            // Rows with an unknown kind or unreadable timestamp are skipped
            let Some(kind) = ActivityKind::parse(&kind) else {
                continue;
            };
            let Ok(timestamp) = DateTime::parse_from_rfc3339(&timestamp) else {
                log::warn!("Skipping activity event {} with bad timestamp", id);
                continue;
            };
            events.push(ActivityEvent {
                id,
                user_id,
                timestamp: timestamp.with_timezone(&Utc),
                kind,
                description,
                metadata: metadata.and_then(|s| serde_json::from_str(&s).ok()),
            });
        }
        Ok(events)
    }

    /// Events of the last `days` days, oldest first
    pub fn recent(&self, user_id: &str, days: i64) -> Result<Vec<ActivityEvent>, StoreError> {
        // A window reaching past the representable range covers everything
        let Some(cutoff) = chrono::Duration::try_days(days)
            .and_then(|window| Utc::now().checked_sub_signed(window))
        else {
            return self.timeline(user_id);
        };
        Ok(self
            .timeline(user_id)?
            .into_iter()
            .filter(|e| e.timestamp >= cutoff)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_log_orders_events() {
        let log = ActivityLog::in_memory().unwrap();
        let user_id = "test_user";

        log.record(&ActivityEvent::new(user_id, ActivityKind::SignedIn, "Signed in"))
            .unwrap();
        log.record(
            &ActivityEvent::new(user_id, ActivityKind::PathsGenerated, "Generated 2 learning paths")
                .with_metadata(serde_json::json!({ "count": 2 })),
        )
        .unwrap();
        log.record(&ActivityEvent::new("someone_else", ActivityKind::SignedIn, "Signed in"))
            .unwrap();

        let timeline = log.timeline(user_id).unwrap();
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[0].kind, ActivityKind::SignedIn);
        assert_eq!(timeline[1].kind, ActivityKind::PathsGenerated);
        assert_eq!(timeline[1].metadata, Some(serde_json::json!({ "count": 2 })));
        assert_eq!(log.recent(user_id, 1).unwrap().len(), 2);
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in [
            ActivityKind::SignedIn,
            ActivityKind::GoalsUpdated,
            ActivityKind::PathsGenerated,
            ActivityKind::PathStarted,
            ActivityKind::PathCompleted,
            ActivityKind::SignedOut,
        ] {
            assert_eq!(ActivityKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ActivityKind::parse("unknown"), None);
    }

    #[test]
    fn test_unreadable_rows_are_skipped() {
        let log = ActivityLog::in_memory().unwrap();
        log.record(&ActivityEvent::new("u", ActivityKind::SignedIn, "Signed in"))
            .unwrap();
        {
            let conn = log.conn.lock().unwrap();
            conn.execute(
                "INSERT INTO activity_events (id, user_id, timestamp, kind, description)
                 VALUES ('bad-ts', 'u', 'yesterday-ish', 'signed_out', 'Signed out')",
                [],
            )
            .unwrap();
            conn.execute(
                "INSERT INTO activity_events (id, user_id, timestamp, kind, description)
                 VALUES ('bad-kind', 'u', '2024-01-01T00:00:00+00:00', 'teleported', '?')",
                [],
            )
            .unwrap();
        }

        let timeline = log.timeline("u").unwrap();
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].kind, ActivityKind::SignedIn);
    }
}
