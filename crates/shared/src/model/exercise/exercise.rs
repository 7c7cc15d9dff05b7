use chrono::NaiveDate;
use exemplar::Model;
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};
use sea_query::{enum_def, Expr, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_rusqlite::RusqliteBinder;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::model::{StoreError, User, UserId};

/// Longest description accepted, counted in characters after trimming
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Model, Serialize, Deserialize)]
#[table("exercises")]
#[enum_def(table_name = "exercises")]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: i64,
    pub user_id: i64,
    pub description: String,
    pub duration: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Model, Serialize, Deserialize)]
#[table("exercises")]
#[serde(rename_all = "camelCase")]
pub struct NewExercise {
    pub user_id: i64,
    pub description: String,
    pub duration: i64,
    pub date: NaiveDate,
}

impl NewExercise {
    pub fn new<T: Into<String>>(
        user_id: UserId,
        description: T,
        duration: i64,
        date: NaiveDate,
    ) -> Self {
        Self {
            user_id: *user_id,
            description: description.into(),
            duration,
            date,
        }
    }
}

impl Exercise {
    fn select_star() -> SelectStatement {
        Query::select()
            .columns([
                ExerciseIden::Id,
                ExerciseIden::UserId,
                ExerciseIden::Description,
                ExerciseIden::Duration,
                ExerciseIden::Date,
            ])
            .from(ExerciseIden::Table)
            .to_owned()
    }

    #[instrument(skip(conn))]
    pub fn fetch_by_id(conn: &Connection, id: i64) -> Result<Option<Exercise>, StoreError> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(ExerciseIden::Id).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let exercise = stmt
            .query_row(&*values.as_params(), Exercise::from_row)
            .optional()?;
        Ok(exercise)
    }

    /// Appends an exercise to the owner's log. The owner has to exist, a
    /// dangling `user_id` is rejected by the foreign key
    #[instrument(skip(conn))]
    pub fn create(conn: &mut Connection, new_exercise: NewExercise) -> Result<Exercise, StoreError> {
        let tx = conn.transaction()?;
        let exercise = Self::insert_and_read_back(&tx, new_exercise)?;
        tx.commit()?;

        debug!(id = exercise.id, user_id = exercise.user_id, "Created exercise");
        Ok(exercise)
    }

    /// Like [`Exercise::create`] but checks the owner first, returning `None`
    /// when they don't exist. The check and the insert share one write
    /// transaction so the owner can't be removed in between
    #[instrument(skip(conn))]
    pub fn create_for_user(
        conn: &mut Connection,
        new_exercise: NewExercise,
    ) -> Result<Option<Exercise>, StoreError> {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(owner) = UserId::new(new_exercise.user_id) else {
            return Ok(None);
        };
        if User::fetch_by_id(&tx, owner)?.is_none() {
            return Ok(None);
        }

        let exercise = Self::insert_and_read_back(&tx, new_exercise)?;
        tx.commit()?;

        debug!(id = exercise.id, user_id = exercise.user_id, "Created exercise");
        Ok(Some(exercise))
    }

    fn insert_and_read_back(
        tx: &Transaction<'_>,
        new_exercise: NewExercise,
    ) -> Result<Exercise, StoreError> {
        new_exercise.insert(tx)?;
        let exercise = Exercise::fetch_by_id(tx, tx.last_insert_rowid())?
            .ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        Ok(exercise)
    }
}
