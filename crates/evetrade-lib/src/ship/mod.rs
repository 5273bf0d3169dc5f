//! Deterministic ship attribute calculators.
//!
//! This module is organized into focused submodules:
//!
//! - [`calculator`] - the shared skill/module/rig fold and its policy trait
//! - [`cargo`], [`warp`], [`inertia`] - the per-attribute policies
//! - [`skills`] and [`fitting`] - caller-supplied character and fit data
//! - [`result`] - calculation output and audit trail
//! - [`constants`] - bonus sizes and formula constants
//!
//! Every entry point is a pure function of its arguments: identical inputs
//! always give bit-identical results.
//!
//! # Example
//!
//! ```no_run
//! use evetrade_lib::ship::{calculate_cargo_capacity, CharacterSkillSet, FittedItem};
//! use evetrade_lib::sde::load_dogma_data;
//!
//! let dogma = load_dogma_data(std::path::Path::new("static_data.db")).unwrap();
//! let skills = CharacterSkillSet::new().with_skill(3340, 5);
//! let fit = vec![FittedItem::new(1319, "LoSlot0")];
//! let cargo = calculate_cargo_capacity(&dogma, 2998, &skills, &fit).unwrap();
//! println!("{:.1} m3", cargo.effective_value);
//! ```

pub mod calculator;
pub mod cargo;
pub mod constants;
pub mod fitting;
pub mod inertia;
pub mod result;
pub mod skills;
pub mod warp;

pub use calculator::{calculate, resolve_ship, AttributeCalculator, SkillBonus};
pub use cargo::CargoCalculator;
pub use constants::MAX_SKILL_LEVEL;
pub use fitting::FittedItem;
pub use inertia::{align_time_secs, ship_mass, InertiaCalculator};
pub use result::{AlignTime, AppliedBonus, BonusSource, CalculationWarning, ShipAttributeResult};
pub use skills::{CharacterSkill, CharacterSkillSet};
pub use warp::{warp_speed_au, WarpSpeedCalculator};

use crate::dogma::TypeId;
use crate::error::Result;
use crate::sde::DogmaSource;

/// Effective cargo capacity in m³.
pub fn calculate_cargo_capacity<S>(
    source: &S,
    ship_type_id: TypeId,
    skills: &CharacterSkillSet,
    fitted_items: &[FittedItem],
) -> Result<ShipAttributeResult>
where
    S: DogmaSource + ?Sized,
{
    calculate(&CargoCalculator, source, ship_type_id, skills, fitted_items)
}

/// Effective warp speed multiplier.
pub fn calculate_warp_speed<S>(
    source: &S,
    ship_type_id: TypeId,
    skills: &CharacterSkillSet,
    fitted_items: &[FittedItem],
) -> Result<ShipAttributeResult>
where
    S: DogmaSource + ?Sized,
{
    calculate(&WarpSpeedCalculator, source, ship_type_id, skills, fitted_items)
}

/// Effective inertia modifier.
pub fn calculate_inertia<S>(
    source: &S,
    ship_type_id: TypeId,
    skills: &CharacterSkillSet,
    fitted_items: &[FittedItem],
) -> Result<ShipAttributeResult>
where
    S: DogmaSource + ?Sized,
{
    calculate(&InertiaCalculator, source, ship_type_id, skills, fitted_items)
}

/// Effective inertia together with the hull mass and resulting align time.
pub fn calculate_align_time<S>(
    source: &S,
    ship_type_id: TypeId,
    skills: &CharacterSkillSet,
    fitted_items: &[FittedItem],
) -> Result<AlignTime>
where
    S: DogmaSource + ?Sized,
{
    let inertia = calculate_inertia(source, ship_type_id, skills, fitted_items)?;
    let mass_kg = ship_mass(resolve_ship(source, ship_type_id)?)?;
    let align_time_secs = align_time_secs(inertia.effective_value, mass_kg);
    Ok(AlignTime {
        inertia,
        mass_kg,
        align_time_secs,
    })
}

/// Effective warp speed in AU/s.
pub fn calculate_warp_speed_au<S>(
    source: &S,
    ship_type_id: TypeId,
    skills: &CharacterSkillSet,
    fitted_items: &[FittedItem],
) -> Result<f64>
where
    S: DogmaSource + ?Sized,
{
    let multiplier = calculate_warp_speed(source, ship_type_id, skills, fitted_items)?;
    Ok(warp_speed_au(resolve_ship(source, ship_type_id)?, &multiplier))
}
