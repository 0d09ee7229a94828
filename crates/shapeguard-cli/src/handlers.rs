//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod check;
mod resolve;
mod utils;
mod validate;

pub use check::handle_check;
pub use resolve::handle_resolve;
pub use validate::handle_validate;
