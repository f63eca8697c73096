//! Command-line interface module.

mod args;
pub mod covers;
pub mod enhance;
pub mod search;

pub use args::{Cli, Commands};
