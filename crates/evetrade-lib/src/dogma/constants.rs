//! Dogma identifiers and stacking constants shared by the calculators.

use super::{AttributeId, TypeId};

/// `mass` attribute; used when the `types.mass` column is empty.
pub const ATTR_MASS: AttributeId = 4;
/// `capacity` attribute (cargo hold volume in m³).
pub const ATTR_CAPACITY: AttributeId = 38;
/// `agility` attribute, the ship's inertia modifier.
pub const ATTR_AGILITY: AttributeId = 70;
/// `requiredSkill1` attribute; names the hull's primary racial skill.
pub const ATTR_REQUIRED_SKILL_1: AttributeId = 182;
/// `warpSpeedMultiplier` attribute.
pub const ATTR_WARP_SPEED_MULTIPLIER: AttributeId = 600;
/// `baseWarpSpeed` attribute (AU/s before the multiplier).
pub const ATTR_BASE_WARP_SPEED: AttributeId = 1281;

pub const SKILL_GALLENTE_HAULER: TypeId = 3340;
pub const SKILL_MINMATAR_HAULER: TypeId = 3341;
pub const SKILL_CALDARI_HAULER: TypeId = 3342;
pub const SKILL_AMARR_HAULER: TypeId = 3343;
pub const SKILL_NAVIGATION: TypeId = 3449;
pub const SKILL_EVASIVE_MANEUVERING: TypeId = 3453;

/// Racial hauler skills that grant a per-level cargo bonus to their hulls.
pub const HAULER_SKILLS: [TypeId; 4] = [
    SKILL_AMARR_HAULER,
    SKILL_CALDARI_HAULER,
    SKILL_GALLENTE_HAULER,
    SKILL_MINMATAR_HAULER,
];

/// Modifier function that changes the item named by its domain itself.
/// `Location*` and `Owner*` functions reach other items and never the hull.
pub const DIRECT_ITEM_MODIFIER: &str = "ItemModifier";

/// Divisor of the stacking-penalty exponent: `P(i) = e^(-(i / 2.67)^2)`.
pub const STACKING_PENALTY_DIVISOR: f64 = 2.67;

/// Stackability assumed for attributes with no `dogmaAttributes` row.
///
/// Most attributes in the dataset are stackable, so a missing flag is
/// treated as stackable rather than silently exempting the bonus.
pub const DEFAULT_ATTRIBUTE_STACKABLE: bool = true;
