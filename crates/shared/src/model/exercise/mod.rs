mod exercise;
pub use exercise::*;

mod filter;
pub use filter::*;

mod log;
pub use log::*;
