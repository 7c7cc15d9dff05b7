use exemplar::Model;
use rusqlite::{Connection, OptionalExtension};
use sea_query::{enum_def, Expr, Order, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_rusqlite::RusqliteBinder;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::model::{is_unique_violation, NewUser, StoreError, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Model, Serialize, Deserialize)]
#[table("users")]
#[enum_def(table_name = "users")]
pub struct User {
    pub id: i64,
    pub username: String,
}

impl User {
    fn select_star() -> SelectStatement {
        Query::select()
            .columns([UserIden::Id, UserIden::Username])
            .from(UserIden::Table)
            .to_owned()
    }

    #[instrument(skip(conn))]
    pub fn fetch_by_id(conn: &Connection, id: UserId) -> Result<Option<User>, StoreError> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(UserIden::Id).eq(*id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let user = stmt
            .query_row(&*values.as_params(), User::from_row)
            .optional()?;
        Ok(user)
    }

    #[instrument(skip(conn))]
    pub fn fetch_all(conn: &Connection) -> Result<Vec<User>, StoreError> {
        let (sql, values) = Self::select_star()
            .order_by(UserIden::Id, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let users = stmt
            .query_map(&*values.as_params(), User::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(users)
    }

    /// Inserts the user and reads it back in the same transaction
    #[instrument(skip(conn))]
    pub fn create(conn: &mut Connection, new_user: NewUser) -> Result<User, StoreError> {
        let tx = conn.transaction()?;
        let user = {
            new_user.insert(&tx).map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::DuplicateUsername {
                        username: new_user.username.clone(),
                    }
                } else {
                    StoreError::from(e)
                }
            })?;
            let id = UserId::new(tx.last_insert_rowid())
                .ok_or(rusqlite::Error::QueryReturnedNoRows)?;
            User::fetch_by_id(&tx, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?
        };
        tx.commit()?;

        debug!(id = user.id, "Created user");
        Ok(user)
    }
}
