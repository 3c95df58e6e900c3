//! Wayfarer CLI library.
//!
//! Terminal styling and output rendering shared by the `wayfarer-cli`
//! subcommands.

pub mod output;
pub mod terminal;
