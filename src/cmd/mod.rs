//! Our CLI subcommands.

pub mod parse;
pub mod transpile;
