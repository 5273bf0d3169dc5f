// Module exports for CLI subcommands.
//
// Each module handles one subcommand and returns the rendered output; main.rs
// only parses arguments, resolves the dataset and prints.

pub mod route;
pub mod ship;
pub mod travel;
