//! CLI module for dispatchr - command-line interface.
//!
//! A single command: answer the query given as arguments, or list tools,
//! or teach the knowledge base a new entry.

pub mod commands;

pub use commands::Cli;
