//! Builds the exercise log query out of optional clauses.
//!
//! Every clause narrows the result and clauses are joined with AND, so an
//! omitted bound imposes no constraint. Date bounds are inclusive.

use chrono::NaiveDate;
use sea_query::{Cond, Expr, Order, Query, SelectStatement, SimpleExpr};
use serde::{Deserialize, Serialize};

use super::ExerciseIden;
use crate::model::{StoreError, UserId};

/// Optional restrictions on a user's exercise log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogClause {
    /// Only exercises belonging to this user
    Owner(UserId),
    /// Exercises on or after this day
    From(NaiveDate),
    /// Exercises on or before this day
    To(NaiveDate),
}

impl LogClause {
    pub fn condition(&self) -> SimpleExpr {
        match self {
            LogClause::Owner(id) => Expr::col(ExerciseIden::UserId).eq(**id),
            // `date` is stored as zero padded YYYY-MM-DD text so string order is day order
            LogClause::From(day) => Expr::col(ExerciseIden::Date).gte(*day),
            LogClause::To(day) => Expr::col(ExerciseIden::Date).lte(*day),
        }
    }
}

impl LogQuery {
    pub fn with_from(mut self, from: NaiveDate) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_to(mut self, to: NaiveDate) -> Self {
        self.to = Some(to);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The clauses this query applies, in the order they're added to the WHERE
    pub fn clauses(&self, user_id: UserId) -> Vec<LogClause> {
        [
            Some(LogClause::Owner(user_id)),
            self.from.map(LogClause::From),
            self.to.map(LogClause::To),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// The row cap, if any. Zero and negative limits are rejected rather than ignored
    pub fn checked_limit(&self) -> Result<Option<u64>, StoreError> {
        match self.limit {
            None => Ok(None),
            Some(limit) if limit > 0 => Ok(Some(limit as u64)),
            Some(limit) => Err(StoreError::InvalidLimit { limit }),
        }
    }

    /// Selects the log entries of `user_id` ordered by day. Entries sharing a
    /// day come back in the order they were logged
    pub fn select(&self, user_id: UserId) -> Result<SelectStatement, StoreError> {
        let limit = self.checked_limit()?;

        let cond = self
            .clauses(user_id)
            .iter()
            .fold(Cond::all(), |cond, clause| cond.add(clause.condition()));

        let mut select = Query::select();
        select
            .columns([
                ExerciseIden::Id,
                ExerciseIden::Description,
                ExerciseIden::Duration,
                ExerciseIden::Date,
            ])
            .from(ExerciseIden::Table)
            .cond_where(cond)
            .order_by(ExerciseIden::Date, Order::Asc)
            .order_by(ExerciseIden::Id, Order::Asc);

        if let Some(limit) = limit {
            select.limit(limit);
        }

        Ok(select)
    }
}
