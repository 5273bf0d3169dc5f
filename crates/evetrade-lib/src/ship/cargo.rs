//! Cargo hold capacity.

use crate::dogma::constants::{ATTR_CAPACITY, ATTR_REQUIRED_SKILL_1, HAULER_SKILLS};
use crate::dogma::{AttributeId, OperationCode, TypeId};
use crate::sde::TypeInfo;

use super::calculator::{AttributeCalculator, SkillBonus};
use super::constants::HAULER_CARGO_BONUS_PER_LEVEL;
use super::skills::CharacterSkillSet;

/// Computes `capacity`. The hull's racial hauler skill, when it names one as
/// its primary requirement, adds a percentage per level.
#[derive(Debug, Clone, Copy, Default)]
pub struct CargoCalculator;

impl AttributeCalculator for CargoCalculator {
    fn name(&self) -> &'static str {
        "cargo"
    }

    fn target_attribute(&self) -> AttributeId {
        ATTR_CAPACITY
    }

    fn skill_bonus(&self, ship: &TypeInfo, skills: &CharacterSkillSet) -> Option<SkillBonus> {
        let skill_id = ship.attribute(ATTR_REQUIRED_SKILL_1)? as TypeId;
        if !HAULER_SKILLS.contains(&skill_id) {
            return None;
        }
        let level = skills.active_level(skill_id)?;
        Some(SkillBonus {
            skill_id,
            level,
            operation: OperationCode::PostPercentCount,
            value: HAULER_CARGO_BONUS_PER_LEVEL * f64::from(level),
        })
    }
}
