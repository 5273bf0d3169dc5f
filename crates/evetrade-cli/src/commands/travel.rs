//! Travel command handler: route plus per-ship travel-time estimate.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use evetrade_cli::args::ShipArgs;
use evetrade_cli::output::{render_travel, OutputFormat};
use evetrade_lib::travel::NOMINAL_JUMP_DISTANCE_AU;
use evetrade_lib::{calculate_travel_time, load_static_data, TravelParams, WarpFormula};

#[derive(Args, Debug, Clone)]
pub struct TravelArgs {
    /// Starting system name or ID.
    #[arg(long = "from")]
    pub from: String,
    /// Destination system name or ID.
    #[arg(long = "to")]
    pub to: String,
    /// Only route through high-sec systems (security 0.45 and above).
    #[arg(long)]
    pub avoid_low_sec: bool,
    /// Use the three-phase warp model instead of distance over speed.
    #[arg(long)]
    pub exact: bool,
    /// Assumed gate-to-gate distance per jump, in AU.
    #[arg(long, default_value_t = NOMINAL_JUMP_DISTANCE_AU)]
    pub jump_distance: f64,
    #[command(flatten)]
    pub ship: ShipArgs,
}

pub fn handle(dataset: &Path, format: OutputFormat, args: &TravelArgs) -> Result<String> {
    let data = load_static_data(dataset)
        .with_context(|| format!("failed to load dataset from {}", dataset.display()))?;
    let start = data.starmap.resolve_system(&args.from)?;
    let goal = data.starmap.resolve_system(&args.to)?;

    let params = TravelParams::for_ship(
        &data.dogma,
        args.ship.ship,
        &args.ship.skill_set(),
        &args.ship.fitted_items(),
    )?
    .with_jump_distance(args.jump_distance);
    let formula = if args.exact {
        WarpFormula::Exact
    } else {
        WarpFormula::Simplified
    };

    let travel = calculate_travel_time(
        &data.starmap,
        start,
        goal,
        args.avoid_low_sec,
        &params,
        formula,
    )?;
    render_travel(format, &data.starmap, &travel)
}
