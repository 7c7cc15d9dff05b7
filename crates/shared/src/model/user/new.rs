use exemplar::Model;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Model, Serialize, Deserialize)]
#[table("users")]
pub struct NewUser {
    pub username: String,
}

impl NewUser {
    pub fn new<T: Into<String>>(username: T) -> Self {
        Self {
            username: username.into(),
        }
    }
}
