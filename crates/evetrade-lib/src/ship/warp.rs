//! Warp speed.

use crate::dogma::constants::{ATTR_BASE_WARP_SPEED, ATTR_WARP_SPEED_MULTIPLIER, SKILL_NAVIGATION};
use crate::dogma::{AttributeId, OperationCode};
use crate::sde::TypeInfo;

use super::calculator::{AttributeCalculator, SkillBonus};
use super::constants::{DEFAULT_BASE_WARP_SPEED_AU, NAVIGATION_WARP_BONUS_PER_LEVEL};
use super::result::ShipAttributeResult;
use super::skills::CharacterSkillSet;

/// Computes `warpSpeedMultiplier`, boosted per level of Navigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarpSpeedCalculator;

impl AttributeCalculator for WarpSpeedCalculator {
    fn name(&self) -> &'static str {
        "warp_speed"
    }

    fn target_attribute(&self) -> AttributeId {
        ATTR_WARP_SPEED_MULTIPLIER
    }

    fn skill_bonus(&self, _ship: &TypeInfo, skills: &CharacterSkillSet) -> Option<SkillBonus> {
        let level = skills.active_level(SKILL_NAVIGATION)?;
        Some(SkillBonus {
            skill_id: SKILL_NAVIGATION,
            level,
            operation: OperationCode::PostPercentCount,
            value: NAVIGATION_WARP_BONUS_PER_LEVEL * f64::from(level),
        })
    }
}

/// Warp speed in AU/s: the hull's `baseWarpSpeed` times the effective
/// multiplier.
pub fn warp_speed_au(ship: &TypeInfo, multiplier: &ShipAttributeResult) -> f64 {
    let base = ship
        .attribute(ATTR_BASE_WARP_SPEED)
        .filter(|value| *value > 0.0)
        .unwrap_or(DEFAULT_BASE_WARP_SPEED_AU);
    base * multiplier.effective_value
}
