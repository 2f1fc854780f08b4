use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wt_cli::commands::util::parse_time;
use wt_cli::commands::{clock, estimate, hours, week};
use wt_cli::{App, Cli, Commands, Config, HoursAction};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let now = Utc::now();
    let offset = *Local::now().offset();
    let app = App::open(&config, offset)?;
    let mut out = std::io::stdout().lock();

    match command {
        Commands::Week { json } => week::run(&mut out, &app, *json)?,
        Commands::Trackable => week::trackable(&mut out, &app)?,
        Commands::Day { name } => week::day(&mut out, &app, name)?,
        Commands::Reset => week::reset(&mut out, &app)?,
        Commands::ClockIn {
            day,
            at,
            accumulated,
        } => {
            let day = app.day_or_today(day.as_deref(), now);
            let at = at
                .as_deref()
                .map_or(Ok(now), |s| parse_time(s, now, offset))?;
            let consider = *accumulated || app.consider_accumulated;
            clock::clock_in(&mut out, &app, &day, at, consider)?;
        }
        Commands::ClockOut { day, at } => {
            let day = app.day_or_today(day.as_deref(), now);
            let at = at
                .as_deref()
                .map_or(Ok(now), |s| parse_time(s, now, offset))?;
            clock::clock_out(&mut out, &app, &day, at)?;
        }
        Commands::Clear { day } => {
            let day = app.day_or_today(day.as_deref(), now);
            clock::clear(&mut out, &app, &day)?;
        }
        Commands::Hours { action } => match action {
            None | Some(HoursAction::Show) => hours::show(&mut out, &app)?,
            Some(HoursAction::Set { hours: h }) => hours::set(&mut out, &app, *h)?,
            Some(HoursAction::Reset) => hours::reset(&mut out, &app)?,
        },
        Commands::Estimate {
            clock_in,
            day,
            accumulated,
        } => {
            let day = app.day_or_today(day.as_deref(), now);
            let clock_in = parse_time(clock_in, now, offset)?;
            let consider = *accumulated || app.consider_accumulated;
            estimate::run(&mut out, &app, &day, clock_in, consider)?;
        }
    }

    Ok(())
}
