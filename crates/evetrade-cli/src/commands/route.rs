//! Route command handler for computing paths between star systems.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use evetrade_cli::output::{render_route, OutputFormat};
use evetrade_lib::{find_shortest_path, load_starmap};

#[derive(Args, Debug, Clone)]
pub struct RouteArgs {
    /// Starting system name or ID.
    #[arg(long = "from")]
    pub from: String,
    /// Destination system name or ID.
    #[arg(long = "to")]
    pub to: String,
    /// Only route through high-sec systems (security 0.45 and above).
    #[arg(long)]
    pub avoid_low_sec: bool,
}

pub fn handle(dataset: &Path, format: OutputFormat, args: &RouteArgs) -> Result<String> {
    let starmap = load_starmap(dataset)
        .with_context(|| format!("failed to load dataset from {}", dataset.display()))?;
    let start = starmap.resolve_system(&args.from)?;
    let goal = starmap.resolve_system(&args.to)?;

    let path = find_shortest_path(&starmap, start, goal, args.avoid_low_sec)?;
    render_route(format, &starmap, &path)
}
