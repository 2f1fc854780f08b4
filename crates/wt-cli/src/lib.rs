//! Workweek tracker CLI library.
//!
//! This crate provides the CLI interface for the workweek tracker.

mod app;
mod cli;
pub mod commands;
mod config;

pub use app::App;
pub use cli::{Cli, Commands, HoursAction};
pub use config::Config;
