//! caproute CLI library.
//!
//! Subcommand handlers, terminal styling and output formatting for the
//! `caproute` binary.

pub mod commands;
pub mod output;
pub mod terminal;
