//! CLI subcommand implementations.

pub mod clock;
pub mod estimate;
pub mod hours;
pub mod util;
pub mod week;
