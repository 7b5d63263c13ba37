//! # CLI Layer
//!
//! This module is **one possible UI client** for platedex. It is the only
//! place that parses shell arguments, writes to stdout/stderr, installs the
//! log subscriber or decides exit codes.
//!
//! - [`args`]: clap definitions
//! - `handlers`: context setup and per-command dispatch to the API
//! - `print`: terminal rendering of `CmdResult`s

pub mod args;
mod handlers;
mod print;

pub use handlers::run;
