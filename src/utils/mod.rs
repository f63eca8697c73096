//! Utility modules shared across subcommands.

pub mod date;
pub mod html;
pub mod plural;
pub mod slug;

pub use plural::plural_count;
