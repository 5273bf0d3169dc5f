//! Shared fold used by every attribute calculator.
//!
//! A calculator only decides which attribute it targets, where the base value
//! comes from and which skill (if any) applies. [`calculate`] then folds the
//! skill bonus and every fitted-item group into the base value:
//!
//! 1. skill bonus, plain application (one character has one level)
//! 2. module groups, stacking-penalized by group size
//! 3. rig groups, stacking-penalized by group size
//!
//! Problems with individual items or effects are recorded as warnings and
//! never abort the calculation.

use tracing::{debug, warn};

use crate::dogma::{
    apply_modifier, apply_modifier_with_stacking, AttributeId, OperationCode, TypeId,
};
use crate::error::{Error, Result};
use crate::sde::{is_attribute_stackable, load_item_profile, DogmaSource, TypeInfo};

use super::fitting::{group_fitted_items, FittedGroup, FittedItem};
use super::result::{AppliedBonus, BonusSource, CalculationWarning, ShipAttributeResult};
use super::skills::CharacterSkillSet;

/// A resolved skill contribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillBonus {
    pub skill_id: TypeId,
    pub level: u8,
    pub operation: OperationCode,
    pub value: f64,
}

/// Per-attribute policy plugged into [`calculate`].
pub trait AttributeCalculator {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Attribute the calculator computes.
    fn target_attribute(&self) -> AttributeId;

    /// Base value before any bonus.
    fn base_value(&self, ship: &TypeInfo) -> Result<f64> {
        ship.attribute(self.target_attribute())
            .ok_or(Error::MissingRequiredAttribute {
                type_id: ship.type_id,
                attribute_id: self.target_attribute(),
            })
    }

    /// Skill bonus for this ship and character, if one applies.
    fn skill_bonus(&self, ship: &TypeInfo, skills: &CharacterSkillSet) -> Option<SkillBonus>;
}

/// Resolve a ship type, failing with [`Error::ShipNotFound`] when it is
/// unknown or has no dogma attributes.
pub fn resolve_ship<S>(source: &S, ship_type_id: TypeId) -> Result<&TypeInfo>
where
    S: DogmaSource + ?Sized,
{
    source
        .type_info(ship_type_id)
        .filter(|info| info.has_dogma_attributes())
        .ok_or(Error::ShipNotFound {
            type_id: ship_type_id,
        })
}

/// Compute one ship attribute from static data, skills and fitting.
pub fn calculate<C, S>(
    calculator: &C,
    source: &S,
    ship_type_id: TypeId,
    skills: &CharacterSkillSet,
    fitted_items: &[FittedItem],
) -> Result<ShipAttributeResult>
where
    C: AttributeCalculator + ?Sized,
    S: DogmaSource + ?Sized,
{
    let ship = resolve_ship(source, ship_type_id)?;
    let target = calculator.target_attribute();
    let base_value = calculator.base_value(ship)?;

    let mut value = base_value;
    let mut applied_bonuses = Vec::new();
    let mut warnings = Vec::new();

    if let Some(bonus) = calculator.skill_bonus(ship, skills) {
        value = apply_modifier(value, bonus.operation, bonus.value, 1);
        let name = source
            .type_info(bonus.skill_id)
            .map(|info| info.name.clone())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Skill {}", bonus.skill_id));
        applied_bonuses.push(AppliedBonus {
            source: BonusSource::Skill,
            type_id: bonus.skill_id,
            name: format!("{name} {}", bonus.level),
            value: bonus.value,
            operation: bonus.operation,
            count: 1,
        });
    }

    let stackable_target = is_attribute_stackable(source, target);
    for group in group_fitted_items(fitted_items) {
        value = fold_group(
            source,
            &group,
            target,
            stackable_target,
            value,
            &mut applied_bonuses,
            &mut warnings,
        );
    }

    debug!(
        calculator = calculator.name(),
        ship_type_id,
        base_value,
        effective_value = value,
        bonuses = applied_bonuses.len(),
        "calculated ship attribute"
    );

    Ok(ShipAttributeResult {
        ship_type_id,
        attribute_id: target,
        base_value,
        effective_value: value,
        applied_bonuses,
        warnings,
    })
}

fn fold_group<S>(
    source: &S,
    group: &FittedGroup,
    target: AttributeId,
    stackable_target: bool,
    mut value: f64,
    applied_bonuses: &mut Vec<AppliedBonus>,
    warnings: &mut Vec<CalculationWarning>,
) -> f64
where
    S: DogmaSource + ?Sized,
{
    if source.type_info(group.type_id).is_none() {
        warn!(type_id = group.type_id, "fitted type not found; skipped");
        warnings.push(CalculationWarning {
            type_id: group.type_id,
            message: format!("fitted type {} not found in static data", group.type_id),
        });
        return value;
    }

    let Some(profile) = load_item_profile(source, group.type_id) else {
        debug!(type_id = group.type_id, "fitted type has no dogma; skipped");
        return value;
    };

    for issue in profile.issues_for(target) {
        let error = issue.to_error();
        warn!(type_id = group.type_id, %error, "effect skipped");
        warnings.push(CalculationWarning {
            type_id: group.type_id,
            message: error.to_string(),
        });
    }

    let stackable = profile.stackable && stackable_target;
    let mut first_applied: Option<(f64, OperationCode)> = None;
    for modifier in profile.modifiers_for(target) {
        let Some(modifier_value) = profile.attribute(modifier.modifying_attribute_id) else {
            warnings.push(CalculationWarning {
                type_id: group.type_id,
                message: format!(
                    "modifying attribute {} missing on {}",
                    modifier.modifying_attribute_id, profile.name
                ),
            });
            continue;
        };

        value = apply_modifier_with_stacking(
            value,
            modifier.operation,
            modifier_value,
            group.count,
            stackable,
        );
        if first_applied.is_none() {
            first_applied = Some((modifier_value, modifier.operation));
        }
    }

    if let Some((bonus_value, operation)) = first_applied {
        applied_bonuses.push(AppliedBonus {
            source: group.source,
            type_id: group.type_id,
            name: profile.name.clone(),
            value: bonus_value,
            operation,
            count: group.count,
        });
    }

    value
}
