use serde::{Deserialize, Serialize};

use crate::{api::response_errors::CreateUserError, model::NewUser};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateUser {
    #[serde(default)]
    pub username: Option<String>,
}

impl CreateUser {
    pub fn into_new_user(self) -> Result<NewUser, CreateUserError> {
        let username = self
            .username
            .map(|u| u.trim().to_owned())
            .filter(|u| !u.is_empty())
            .ok_or(CreateUserError::UsernameRequired)?;
        Ok(NewUser::new(username))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn username_is_required() {
        for username in [None, Some(String::new()), Some("   ".to_owned())] {
            let payload = CreateUser { username };
            assert_eq!(payload.into_new_user(), Err(CreateUserError::UsernameRequired));
        }
    }

    #[test]
    fn username_is_trimmed_but_keeps_case() {
        let payload = CreateUser {
            username: Some("  Alice ".to_owned()),
        };
        assert_eq!(payload.into_new_user(), Ok(NewUser::new("Alice")));
    }
}
