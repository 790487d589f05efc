// Handlers for the CLI subcommands. main.rs parses arguments and dispatches here.

pub mod cities;
pub mod route;
