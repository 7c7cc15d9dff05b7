use const_format::concatcp;
pub mod error;
pub mod payloads;
pub mod response_errors;

pub const API_BASE_PATH: &str = "/api/";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Object {
    Users,
    UserId,
    UserExercises,
    UserLogs,
}

impl Object {
    pub const fn path(&self) -> &str {
        use Object::*;
        match self {
            Users => concatcp!(API_BASE_PATH, "users"),
            UserId => concatcp!(API_BASE_PATH, "users/:id"),
            UserExercises => concatcp!(API_BASE_PATH, "users/:id/exercises"),
            UserLogs => concatcp!(API_BASE_PATH, "users/:id/logs"),
        }
    }

    /// Fills the `:id` segment of the path in with a concrete user id
    pub fn path_for(&self, id: i64) -> String {
        self.path().replace(":id", &id.to_string())
    }
}
