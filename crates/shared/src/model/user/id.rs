use std::{fmt, ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::User;

/// A structurally valid user id. Checked before any lookup reaches the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(i64);

#[derive(Debug, Clone, PartialEq, Error)]
#[error("user ids are positive integers, got {0:?}")]
pub struct InvalidUserId(pub String);

impl UserId {
    pub fn new(id: i64) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }
}

impl FromStr for UserId {
    type Err = InvalidUserId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .ok()
            .and_then(UserId::new)
            .ok_or_else(|| InvalidUserId(s.to_owned()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Deref for UserId {
    type Target = i64;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&User> for UserId {
    fn from(value: &User) -> Self {
        Self(value.id)
    }
}
