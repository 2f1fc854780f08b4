//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Workweek tracker.
///
/// Records when each workday starts and ends, and estimates when today's
/// workday should end.
#[derive(Debug, Parser)]
#[command(name = "wt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the whole week.
    Week {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the days that take part in tracking.
    Trackable,

    /// Show a single day.
    Day {
        /// Canonical day name (e.g. Monday, Lunes).
        name: String,
    },

    /// Record the start of the workday and print the estimated exit.
    ClockIn {
        /// Day to clock in on. Defaults to today.
        #[arg(long)]
        day: Option<String>,

        /// Clock-in time: RFC 3339 or HH:MM today. Defaults to now.
        #[arg(long)]
        at: Option<String>,

        /// Add the hours worked on other days to the estimate.
        #[arg(long)]
        accumulated: bool,
    },

    /// Record the end of the workday.
    ClockOut {
        /// Day to clock out on. Defaults to today.
        #[arg(long)]
        day: Option<String>,

        /// Clock-out time: RFC 3339 or HH:MM today. Defaults to now.
        #[arg(long)]
        at: Option<String>,
    },

    /// Discard a day's clock-in and clock-out.
    Clear {
        /// Day to clear. Defaults to today.
        #[arg(long)]
        day: Option<String>,
    },

    /// Reset the week to empty default days.
    Reset,

    /// Show or change the preferred workday length.
    Hours {
        #[command(subcommand)]
        action: Option<HoursAction>,
    },

    /// Estimate the end of a workday without recording anything.
    Estimate {
        /// Clock-in time: RFC 3339 or HH:MM today.
        #[arg(long)]
        clock_in: String,

        /// Day the estimate is for. Defaults to today.
        #[arg(long)]
        day: Option<String>,

        /// Add the hours worked on other days to the estimate.
        #[arg(long)]
        accumulated: bool,
    },
}

/// Workday preference actions.
#[derive(Debug, Subcommand)]
pub enum HoursAction {
    /// Print the preferred workday length.
    Show,
    /// Set the preferred workday length in hours.
    Set {
        /// Hours per workday (e.g. 7.5).
        hours: f64,
    },
    /// Restore the default workday length.
    Reset,
}
