//! evetrade CLI library.
//!
//! Argument parsers and output formatting shared by the `evetrade-cli`
//! binary's subcommands.

pub mod args;
pub mod output;
