//! Typed dogma model decoded from the static dataset.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::constants::DIRECT_ITEM_MODIFIER;
use crate::error::{Error, Result};

/// Numeric identifier for an inventory type (ship, module, rig, skill).
pub type TypeId = i64;
/// Numeric identifier for a dogma attribute.
pub type AttributeId = i64;
/// Numeric identifier for a dogma effect.
pub type EffectId = i64;

/// One decoded entry from a type's attribute blob.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeValue {
    #[serde(rename = "attributeID")]
    pub attribute_id: AttributeId,
    pub value: f64,
}

/// Location a modifier applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierDomain {
    Ship,
    Char,
    Target,
}

impl ModifierDomain {
    /// Parse the domain string used by `modifierInfo` rows.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "shipID" | "ship" => Some(ModifierDomain::Ship),
            "charID" | "char" => Some(ModifierDomain::Char),
            "targetID" | "target" => Some(ModifierDomain::Target),
            _ => None,
        }
    }
}

/// How a modifier combines with the value it modifies.
///
/// The discriminants are the operation codes stored in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationCode {
    PreAssign = 0,
    PreMul = 1,
    PreDiv = 2,
    ModAdd = 3,
    PostMulCount = 4,
    PostDivCount = 5,
    PostPercentCount = 6,
    PostAssign = 7,
}

impl OperationCode {
    /// Decode a raw operation code.
    pub fn from_code(code: i64) -> Result<Self> {
        let operation = match code {
            0 => OperationCode::PreAssign,
            1 => OperationCode::PreMul,
            2 => OperationCode::PreDiv,
            3 => OperationCode::ModAdd,
            4 => OperationCode::PostMulCount,
            5 => OperationCode::PostDivCount,
            6 => OperationCode::PostPercentCount,
            7 => OperationCode::PostAssign,
            other => {
                return Err(Error::MalformedEffect {
                    effect_id: None,
                    reason: format!("unknown operation code {other}"),
                })
            }
        };
        Ok(operation)
    }

    /// Raw operation code as stored in the dataset.
    pub fn code(self) -> i64 {
        self as i64
    }

    /// Whether the number of applications changes the result.
    pub fn is_count_based(self) -> bool {
        matches!(
            self,
            OperationCode::PostMulCount
                | OperationCode::PostDivCount
                | OperationCode::PostPercentCount
        )
    }
}

impl fmt::Display for OperationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            OperationCode::PreAssign => "pre_assign",
            OperationCode::PreMul => "pre_mul",
            OperationCode::PreDiv => "pre_div",
            OperationCode::ModAdd => "mod_add",
            OperationCode::PostMulCount => "post_mul",
            OperationCode::PostDivCount => "post_div",
            OperationCode::PostPercentCount => "post_percent",
            OperationCode::PostAssign => "post_assign",
        };
        f.write_str(value)
    }
}

/// A single typed modifier of an effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModifierInfo {
    pub domain: ModifierDomain,
    pub target_function: String,
    pub modified_attribute_id: AttributeId,
    pub modifying_attribute_id: AttributeId,
    pub operation: OperationCode,
}

impl ModifierInfo {
    /// Whether the modifier changes the fitting ship's own attribute.
    ///
    /// Target-domain modifiers act on whatever the item is pointed at, and
    /// location or owner functions act on other fitted items or skills. An
    /// absent function is read as a direct item modifier.
    pub fn acts_on_fitting_ship(&self) -> bool {
        self.domain != ModifierDomain::Target
            && (self.target_function.is_empty() || self.target_function == DIRECT_ITEM_MODIFIER)
    }
}

/// Part of an effect that could not be decoded.
///
/// `modified_attribute_id` is known when only one modifier was bad; it is
/// `None` when the whole `modifierInfo` blob was unreadable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectIssue {
    pub effect_id: Option<EffectId>,
    pub modified_attribute_id: Option<AttributeId>,
    pub reason: String,
}

impl EffectIssue {
    /// Whether the issue could have changed the given attribute.
    pub fn affects(&self, attribute_id: AttributeId) -> bool {
        self.modified_attribute_id
            .map(|id| id == attribute_id)
            .unwrap_or(true)
    }

    pub fn to_error(&self) -> Error {
        Error::MalformedEffect {
            effect_id: self.effect_id,
            reason: self.reason.clone(),
        }
    }
}

/// A dogma effect with its decoded modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    pub effect_id: EffectId,
    pub name: String,
    pub modifiers: Vec<ModifierInfo>,
    pub issues: Vec<EffectIssue>,
}

/// Full decoded profile of one fitted type.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemEffectProfile {
    pub type_id: TypeId,
    pub name: String,
    pub attributes: HashMap<AttributeId, AttributeValue>,
    pub effects: Vec<Effect>,
    /// At least one modifier targets a stacking-penalized attribute.
    pub stackable: bool,
}

impl ItemEffectProfile {
    /// Raw value of one of the item's own attributes.
    pub fn attribute(&self, attribute_id: AttributeId) -> Option<f64> {
        self.attributes.get(&attribute_id).map(|attr| attr.value)
    }

    /// Modifiers on the ship that change `attribute_id`, in effect order.
    ///
    /// See [`ModifierInfo::acts_on_fitting_ship`] for which modifiers count.
    pub fn modifiers_for(&self, attribute_id: AttributeId) -> impl Iterator<Item = &ModifierInfo> {
        self.effects
            .iter()
            .flat_map(|effect| effect.modifiers.iter())
            .filter(move |modifier| {
                modifier.modified_attribute_id == attribute_id && modifier.acts_on_fitting_ship()
            })
    }

    /// Decode issues that may have affected `attribute_id`.
    pub fn issues_for(&self, attribute_id: AttributeId) -> impl Iterator<Item = &EffectIssue> {
        self.effects
            .iter()
            .flat_map(|effect| effect.issues.iter())
            .filter(move |issue| issue.affects(attribute_id))
    }
}
