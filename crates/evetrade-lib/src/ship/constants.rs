//! Constants used by the ship attribute calculators.

/// Highest level a skill can be trained to.
pub const MAX_SKILL_LEVEL: u8 = 5;

/// Cargo bonus per level of a racial hauler skill, in percent.
pub const HAULER_CARGO_BONUS_PER_LEVEL: f64 = 5.0;

/// Warp speed bonus per level of Navigation, in percent.
pub const NAVIGATION_WARP_BONUS_PER_LEVEL: f64 = 5.0;

/// Inertia reduction per level of Evasive Maneuvering, as a fraction.
pub const EVASIVE_MANEUVERING_REDUCTION_PER_LEVEL: f64 = 0.05;

/// Divisor of the align-time formula `ln(2) * inertia * mass / 500_000`.
pub const ALIGN_TIME_DIVISOR: f64 = 500_000.0;

/// Base warp speed in AU/s for hulls without a `baseWarpSpeed` attribute.
pub const DEFAULT_BASE_WARP_SPEED_AU: f64 = 1.0;

/// Slot-name prefix that marks a fitted item as a rig.
pub const RIG_SLOT_PREFIX: &str = "Rig";
