// Handler modules
pub mod check;

pub use check::{handle_check, run_check};
