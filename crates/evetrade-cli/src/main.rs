use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use evetrade_cli::args::ShipArgs;
use evetrade_cli::output::OutputFormat;
use evetrade_lib::{resolve_dataset, DATASET_ENV_VAR};

mod commands;

use commands::route::RouteArgs;
use commands::ship::ShipAttribute;
use commands::travel::TravelArgs;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Ship attribute, routing and travel-time estimates from EVE static data"
)]
struct Cli {
    /// Dataset file, or a directory containing static_data.db.
    #[arg(long, global = true, env = DATASET_ENV_VAR)]
    dataset: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Effective cargo capacity of a fitted ship.
    Cargo(ShipArgs),
    /// Effective warp speed of a fitted ship.
    Warp(ShipArgs),
    /// Effective inertia modifier and align time of a fitted ship.
    Align(ShipArgs),
    /// Shortest stargate route between two systems.
    Route(RouteArgs),
    /// Shortest route with a travel-time estimate for a fitted ship.
    Travel(TravelArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let dataset = resolve_dataset(cli.dataset.as_deref())
        .context("failed to locate the static data export")?;

    let format = cli.format;
    let ship = |attribute: ShipAttribute, args: &ShipArgs| {
        commands::ship::handle(&dataset, format, attribute, args)
    };
    let rendered = match &cli.command {
        Command::Cargo(args) => ship(ShipAttribute::Cargo, args)?,
        Command::Warp(args) => ship(ShipAttribute::Warp, args)?,
        Command::Align(args) => ship(ShipAttribute::Align, args)?,
        Command::Route(args) => commands::route::handle(&dataset, format, args)?,
        Command::Travel(args) => commands::travel::handle(&dataset, format, args)?,
    };

    print!("{rendered}");
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
