//! Inertia modifier and align time.

use std::f64::consts::LN_2;

use crate::dogma::constants::{ATTR_AGILITY, ATTR_MASS, SKILL_EVASIVE_MANEUVERING};
use crate::dogma::{AttributeId, OperationCode};
use crate::error::{Error, Result};
use crate::sde::TypeInfo;

use super::calculator::{AttributeCalculator, SkillBonus};
use super::constants::{ALIGN_TIME_DIVISOR, EVASIVE_MANEUVERING_REDUCTION_PER_LEVEL};
use super::skills::CharacterSkillSet;

/// Computes `agility`. Evasive Maneuvering reduces it by a fraction per level,
/// the only subtractive skill bonus among the calculators.
#[derive(Debug, Clone, Copy, Default)]
pub struct InertiaCalculator;

impl AttributeCalculator for InertiaCalculator {
    fn name(&self) -> &'static str {
        "inertia"
    }

    fn target_attribute(&self) -> AttributeId {
        ATTR_AGILITY
    }

    fn skill_bonus(&self, _ship: &TypeInfo, skills: &CharacterSkillSet) -> Option<SkillBonus> {
        let level = skills.active_level(SKILL_EVASIVE_MANEUVERING)?;
        Some(SkillBonus {
            skill_id: SKILL_EVASIVE_MANEUVERING,
            level,
            operation: OperationCode::PreMul,
            value: 1.0 - EVASIVE_MANEUVERING_REDUCTION_PER_LEVEL * f64::from(level),
        })
    }
}

/// Hull mass in kg from the `types.mass` column, falling back to the `mass`
/// attribute.
pub fn ship_mass(ship: &TypeInfo) -> Result<f64> {
    ship.mass
        .filter(|mass| *mass > 0.0)
        .or_else(|| ship.attribute(ATTR_MASS).filter(|mass| *mass > 0.0))
        .ok_or(Error::MissingRequiredAttribute {
            type_id: ship.type_id,
            attribute_id: ATTR_MASS,
        })
}

/// Seconds to reach warp: `ln(2) * inertia * mass / 500_000`.
pub fn align_time_secs(inertia: f64, mass_kg: f64) -> f64 {
    LN_2 * inertia * mass_kg / ALIGN_TIME_DIVISOR
}
