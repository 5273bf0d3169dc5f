//! Output formatting for calculation and route results.
//!
//! Text output is meant for people; JSON output mirrors the library result
//! types so scripts can consume the full audit trail.

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use evetrade_lib::{
    AlignTime, AppliedBonus, PathResult, RouteResult, ShipAttributeResult, Starmap, SystemId,
};

/// Output format for every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Label and unit used when rendering a ship attribute.
#[derive(Debug, Clone, Copy)]
pub struct AttributeLabel {
    pub title: &'static str,
    pub unit: &'static str,
}

/// A route hop with its resolved system name.
#[derive(Debug, Clone, Serialize)]
pub struct NamedSystem {
    pub id: SystemId,
    pub name: String,
}

#[derive(Serialize)]
struct RouteJson<'a> {
    jumps: usize,
    route: Vec<NamedSystem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    travel: Option<&'a RouteResult>,
}

pub fn named_route(starmap: &Starmap, route: &[SystemId]) -> Vec<NamedSystem> {
    route
        .iter()
        .map(|&id| NamedSystem {
            id,
            name: starmap.system_name(id).unwrap_or("<unknown>").to_string(),
        })
        .collect()
}

pub fn render_attribute(
    format: OutputFormat,
    label: AttributeLabel,
    result: &ShipAttributeResult,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Text => {
            let mut out = format!(
                "{}: {:.2}{} (base {:.2})\n",
                label.title, result.effective_value, label.unit, result.base_value
            );
            append_bonuses(&mut out, &result.applied_bonuses);
            append_warnings(&mut out, result);
            Ok(out)
        }
    }
}

#[derive(Serialize)]
struct WarpSpeedJson<'a> {
    warp_speed_au: f64,
    multiplier: &'a ShipAttributeResult,
}

pub fn render_warp_speed(
    format: OutputFormat,
    multiplier: &ShipAttributeResult,
    warp_speed_au: f64,
) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&WarpSpeedJson {
            warp_speed_au,
            multiplier,
        })?),
        OutputFormat::Text => {
            let mut out = format!(
                "Warp speed: {:.2} AU/s (multiplier {:.4}, base {:.4})\n",
                warp_speed_au, multiplier.effective_value, multiplier.base_value
            );
            append_bonuses(&mut out, &multiplier.applied_bonuses);
            append_warnings(&mut out, multiplier);
            Ok(out)
        }
    }
}

pub fn render_align_time(format: OutputFormat, align: &AlignTime) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(align)?),
        OutputFormat::Text => {
            let mut out = format!(
                "Align time: {:.2}s (inertia {:.4}, mass {:.0} kg)\n",
                align.align_time_secs, align.inertia.effective_value, align.mass_kg
            );
            append_bonuses(&mut out, &align.inertia.applied_bonuses);
            append_warnings(&mut out, &align.inertia);
            Ok(out)
        }
    }
}

pub fn render_route(format: OutputFormat, starmap: &Starmap, path: &PathResult) -> Result<String> {
    let route = named_route(starmap, &path.route);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&RouteJson {
            jumps: path.jumps,
            route,
            travel: None,
        })?),
        OutputFormat::Text => {
            let mut out = format!("Route ({} jumps):\n", path.jumps);
            append_systems(&mut out, &route);
            Ok(out)
        }
    }
}

pub fn render_travel(
    format: OutputFormat,
    starmap: &Starmap,
    travel: &RouteResult,
) -> Result<String> {
    let route = named_route(starmap, &travel.route);
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&RouteJson {
            jumps: travel.jumps,
            route,
            travel: Some(travel),
        })?),
        OutputFormat::Text => {
            let mut out = format!(
                "Route ({} jumps), {} warp formula:\n",
                travel.jumps, travel.formula
            );
            append_systems(&mut out, &route);
            out.push_str(&format!(
                "Per jump: {:.1}s\nTotal: {} ({:.1}s)\n",
                travel.per_jump_secs,
                format_duration(travel.total_secs),
                travel.total_secs
            ));
            Ok(out)
        }
    }
}

/// `1h 02m 03s`, `4m 05s` or `6s`, rounded to the nearest second.
pub fn format_duration(secs: f64) -> String {
    let total = secs.max(0.0).round() as u64;
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}h {minutes:02}m {seconds:02}s")
    } else if minutes > 0 {
        format!("{minutes}m {seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}

fn append_systems(out: &mut String, route: &[NamedSystem]) {
    for system in route {
        out.push_str(&format!("- {} ({})\n", system.name, system.id));
    }
}

fn append_bonuses(out: &mut String, bonuses: &[AppliedBonus]) {
    for bonus in bonuses {
        let count = if bonus.count > 1 {
            format!(" x{}", bonus.count)
        } else {
            String::new()
        };
        out.push_str(&format!(
            "  + {}{} [{} {}]\n",
            bonus.name, count, bonus.operation, bonus.value
        ));
    }
}

fn append_warnings(out: &mut String, result: &ShipAttributeResult) {
    for warning in &result.warnings {
        out.push_str(&format!("  ! {}\n", warning.message));
    }
}
