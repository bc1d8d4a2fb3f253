//! CLI module graph.

pub mod command;
pub mod config;
pub mod limits;
pub mod output;
pub mod simulate;
