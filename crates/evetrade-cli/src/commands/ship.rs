//! Ship attribute command handlers (`cargo`, `warp`, `align`).

use std::path::Path;

use anyhow::{Context, Result};

use evetrade_cli::args::ShipArgs;
use evetrade_cli::output::{
    render_align_time, render_attribute, render_warp_speed, AttributeLabel, OutputFormat,
};
use evetrade_lib::{
    calculate_align_time, calculate_cargo_capacity, calculate_warp_speed, calculate_warp_speed_au,
    load_dogma_data,
};

/// Which ship attribute a command computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipAttribute {
    Cargo,
    Warp,
    Align,
}

pub fn handle(
    dataset: &Path,
    format: OutputFormat,
    attribute: ShipAttribute,
    args: &ShipArgs,
) -> Result<String> {
    let dogma = load_dogma_data(dataset)
        .with_context(|| format!("failed to load dataset from {}", dataset.display()))?;
    let skills = args.skill_set();
    let fit = args.fitted_items();

    match attribute {
        ShipAttribute::Cargo => {
            let result = calculate_cargo_capacity(&dogma, args.ship, &skills, &fit)?;
            let label = AttributeLabel {
                title: "Cargo capacity",
                unit: " m3",
            };
            render_attribute(format, label, &result)
        }
        ShipAttribute::Warp => {
            let multiplier = calculate_warp_speed(&dogma, args.ship, &skills, &fit)?;
            let warp_speed_au = calculate_warp_speed_au(&dogma, args.ship, &skills, &fit)?;
            render_warp_speed(format, &multiplier, warp_speed_au)
        }
        ShipAttribute::Align => {
            let align = calculate_align_time(&dogma, args.ship, &skills, &fit)?;
            render_align_time(format, &align)
        }
    }
}
