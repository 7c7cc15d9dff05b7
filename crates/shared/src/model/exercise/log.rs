use chrono::NaiveDate;
use exemplar::Model;
use rusqlite::Connection;
use sea_query::SqliteQueryBuilder;
use sea_query_rusqlite::RusqliteBinder;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::model::{LogQuery, StoreError, User, UserId};

/// One exercise as it appears in a log
#[derive(Debug, Clone, PartialEq, Eq, Model, Serialize, Deserialize)]
#[table("exercises")]
pub struct LogEntry {
    pub id: i64,
    pub description: String,
    pub duration: i64,
    pub date: NaiveDate,
}

/// A user's exercise history. Built fresh for every query and never stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseLog {
    pub id: i64,
    pub username: String,
    pub logs: Vec<LogEntry>,
    pub count: usize,
}

impl ExerciseLog {
    pub fn new(user: User, logs: Vec<LogEntry>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            count: logs.len(),
            logs,
        }
    }

    /// Returns `None` when the user doesn't exist, without looking at any
    /// exercises. The user lookup and the log read share one transaction
    #[instrument(skip(conn))]
    pub fn fetch(
        conn: &Connection,
        user_id: UserId,
        query: &LogQuery,
    ) -> Result<Option<ExerciseLog>, StoreError> {
        let tx = conn.unchecked_transaction()?;

        let Some(user) = User::fetch_by_id(&tx, user_id)? else {
            return Ok(None);
        };

        let (sql, values) = query.select(user_id)?.build_rusqlite(SqliteQueryBuilder);

        let logs = {
            let mut stmt = tx.prepare_cached(&sql)?;
            let rows = stmt.query_map(&*values.as_params(), LogEntry::from_row)?;
            rows.collect::<Result<Vec<_>, _>>()?
        };
        tx.commit()?;

        debug!(count = logs.len(), "Fetched exercise log");
        Ok(Some(ExerciseLog::new(user, logs)))
    }
}
