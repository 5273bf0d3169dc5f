//! Dogma model and modifier algebra.
//!
//! - [`types`] - typed attributes, modifiers, effects and item profiles
//! - [`modifier`] - operation-code semantics and stacking penalties
//! - [`constants`] - attribute and skill identifiers used by the calculators

pub mod constants;
pub mod modifier;
pub mod types;

pub use constants::DEFAULT_ATTRIBUTE_STACKABLE;
pub use modifier::{apply_modifier, apply_modifier_with_stacking, stacking_penalty};
pub use types::{
    AttributeId, AttributeValue, Effect, EffectId, EffectIssue, ItemEffectProfile,
    ModifierDomain, ModifierInfo, OperationCode, TypeId,
};
