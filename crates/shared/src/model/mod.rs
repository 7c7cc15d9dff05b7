mod user;
pub use user::*;

mod exercise;
pub use exercise::*;

mod store_error;
pub use store_error::*;
