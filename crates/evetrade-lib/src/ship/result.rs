//! Calculator output and audit trail.

use serde::Serialize;

use crate::dogma::{AttributeId, OperationCode, TypeId};

/// Where an applied bonus came from.
///
/// Variant order is application order: skills, then modules, then rigs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusSource {
    Skill,
    Module,
    Rig,
}

/// One contributing skill or fitted-item group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedBonus {
    pub source: BonusSource,
    pub type_id: TypeId,
    pub name: String,
    pub value: f64,
    pub operation: OperationCode,
    pub count: u32,
}

/// A non-fatal problem met while calculating: a fitted type that could not
/// be resolved or effect data that could not be applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationWarning {
    pub type_id: TypeId,
    pub message: String,
}

/// Computed ship attribute with its audit trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipAttributeResult {
    pub ship_type_id: TypeId,
    pub attribute_id: AttributeId,
    pub base_value: f64,
    pub effective_value: f64,
    pub applied_bonuses: Vec<AppliedBonus>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CalculationWarning>,
}

/// Align time derived from a ship's effective inertia modifier and mass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignTime {
    pub inertia: ShipAttributeResult,
    pub mass_kg: f64,
    pub align_time_secs: f64,
}
