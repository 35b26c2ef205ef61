//! Library components of the `mrec` command-line tool.

pub mod cli;
pub mod config;
pub mod logging;
pub mod progress;
