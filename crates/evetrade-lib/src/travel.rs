//! Travel-time estimation along a stargate route.
//!
//! Two interchangeable per-jump models are provided:
//!
//! - [`WarpFormula::Simplified`]: `align + distance / warp_speed`
//! - [`WarpFormula::Exact`]: align plus a three-phase warp (exponential
//!   acceleration, cruise, exponential deceleration)
//!
//! Neither is an approximation of the other; both are deterministic
//! functions of distance, warp speed and align time. Session changes and
//! gate activation are not modelled.

use std::fmt;

use serde::Serialize;

use crate::db::{Starmap, SystemId};
use crate::dogma::TypeId;
use crate::error::{Error, Result};
use crate::path::{find_shortest_path, PathResult};
use crate::sde::DogmaSource;
use crate::ship::{calculate_align_time, calculate_warp_speed_au, CharacterSkillSet, FittedItem};

/// Metres in one astronomical unit.
pub const AU_IN_METERS: f64 = 149_597_870_700.0;

/// Gate-to-gate distance assumed when exact distances are unavailable.
pub const NOMINAL_JUMP_DISTANCE_AU: f64 = 15.0;

/// Cap on the warp deceleration rate, in 1/s.
pub const MAX_WARP_DECELERATION: f64 = 2.0;

/// Speed (m/s) at which a ship drops out of warp.
pub const WARP_DROPOUT_SPEED: f64 = 100.0;

/// Per-jump travel-time model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarpFormula {
    #[default]
    Simplified,
    Exact,
}

impl fmt::Display for WarpFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarpFormula::Simplified => f.write_str("simplified"),
            WarpFormula::Exact => f.write_str("exact"),
        }
    }
}

/// Ship-dependent inputs to the travel-time models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TravelParams {
    pub warp_speed_au: f64,
    pub align_time_secs: f64,
    pub jump_distance_au: f64,
}

impl TravelParams {
    /// Parameters using [`NOMINAL_JUMP_DISTANCE_AU`].
    pub fn new(warp_speed_au: f64, align_time_secs: f64) -> Self {
        Self {
            warp_speed_au,
            align_time_secs,
            jump_distance_au: NOMINAL_JUMP_DISTANCE_AU,
        }
    }

    pub fn with_jump_distance(mut self, jump_distance_au: f64) -> Self {
        self.jump_distance_au = jump_distance_au;
        self
    }

    /// Derive warp speed and align time from a ship, skills and fitting.
    pub fn for_ship<S>(
        source: &S,
        ship_type_id: TypeId,
        skills: &CharacterSkillSet,
        fitted_items: &[FittedItem],
    ) -> Result<Self>
    where
        S: DogmaSource + ?Sized,
    {
        let warp_speed_au = calculate_warp_speed_au(source, ship_type_id, skills, fitted_items)?;
        let align = calculate_align_time(source, ship_type_id, skills, fitted_items)?;
        Ok(Self::new(warp_speed_au, align.align_time_secs))
    }

    /// Validate that every input is finite and in range.
    pub fn validate(&self) -> Result<()> {
        if !self.warp_speed_au.is_finite() || self.warp_speed_au <= 0.0 {
            return Err(Error::InvalidTravelParameter {
                message: format!(
                    "warp speed must be finite and positive, got {}",
                    self.warp_speed_au
                ),
            });
        }
        if !self.jump_distance_au.is_finite() || self.jump_distance_au <= 0.0 {
            return Err(Error::InvalidTravelParameter {
                message: format!(
                    "jump distance must be finite and positive, got {}",
                    self.jump_distance_au
                ),
            });
        }
        if !self.align_time_secs.is_finite() || self.align_time_secs < 0.0 {
            return Err(Error::InvalidTravelParameter {
                message: format!(
                    "align time must be finite and non-negative, got {}",
                    self.align_time_secs
                ),
            });
        }
        Ok(())
    }
}

/// Route with its travel-time estimate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResult {
    pub route: Vec<SystemId>,
    pub jumps: usize,
    pub per_jump_secs: f64,
    pub total_secs: f64,
    pub formula: WarpFormula,
}

/// Seconds spent in warp for one hop under the three-phase model.
///
/// Acceleration and deceleration rates are `k_a = warp_speed` and
/// `k_d = min(warp_speed / 3, 2)`. Acceleration covers `v / k_a` metres and
/// deceleration `v / k_d`; when the hop is shorter than both together the
/// peak speed is lowered so the two phases meet.
pub fn exact_warp_secs(distance_au: f64, warp_speed_au: f64) -> f64 {
    let accel_rate = warp_speed_au;
    let decel_rate = (warp_speed_au / 3.0).min(MAX_WARP_DECELERATION);
    let distance = distance_au * AU_IN_METERS;

    let mut peak_speed = warp_speed_au * AU_IN_METERS;
    if peak_speed / accel_rate + peak_speed / decel_rate > distance {
        peak_speed = distance * accel_rate * decel_rate / (accel_rate + decel_rate);
    }

    let accel_distance = peak_speed / accel_rate;
    let decel_distance = peak_speed / decel_rate;

    let accel_secs = if peak_speed > accel_rate {
        (peak_speed / accel_rate).ln() / accel_rate
    } else {
        0.0
    };
    let decel_secs = if peak_speed > WARP_DROPOUT_SPEED {
        (peak_speed / WARP_DROPOUT_SPEED).ln() / decel_rate
    } else {
        0.0
    };
    let cruise_secs = (distance - accel_distance - decel_distance).max(0.0) / peak_speed;

    accel_secs + cruise_secs + decel_secs
}

/// Seconds for one jump (align plus warp) under the chosen model.
pub fn jump_time_secs(params: &TravelParams, formula: WarpFormula) -> Result<f64> {
    params.validate()?;
    let warp_secs = match formula {
        WarpFormula::Simplified => params.jump_distance_au / params.warp_speed_au,
        WarpFormula::Exact => exact_warp_secs(params.jump_distance_au, params.warp_speed_au),
    };
    Ok(params.align_time_secs + warp_secs)
}

/// Estimate the travel time along an already computed path.
pub fn travel_time_for_path(
    path: &PathResult,
    params: &TravelParams,
    formula: WarpFormula,
) -> Result<RouteResult> {
    let per_jump_secs = jump_time_secs(params, formula)?;
    Ok(RouteResult {
        route: path.route.clone(),
        jumps: path.jumps,
        per_jump_secs,
        total_secs: per_jump_secs * path.jumps as f64,
        formula,
    })
}

/// Route between two systems and estimate the travel time.
pub fn calculate_travel_time(
    starmap: &Starmap,
    start: SystemId,
    goal: SystemId,
    avoid_low_sec: bool,
    params: &TravelParams,
    formula: WarpFormula,
) -> Result<RouteResult> {
    params.validate()?;
    let path = find_shortest_path(starmap, start, goal, avoid_low_sec)?;
    travel_time_for_path(&path, params, formula)
}
