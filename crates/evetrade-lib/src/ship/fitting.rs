//! Fitted items and their grouping into stacking groups.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dogma::TypeId;

use super::constants::RIG_SLOT_PREFIX;
use super::result::BonusSource;

/// One item fitted to a ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FittedItem {
    pub type_id: TypeId,
    pub slot: String,
}

impl FittedItem {
    pub fn new(type_id: TypeId, slot: impl Into<String>) -> Self {
        Self {
            type_id,
            slot: slot.into(),
        }
    }

    /// Rigs are recognised by their slot name only.
    pub fn is_rig(&self) -> bool {
        self.slot.starts_with(RIG_SLOT_PREFIX)
    }

    fn source(&self) -> BonusSource {
        if self.is_rig() {
            BonusSource::Rig
        } else {
            BonusSource::Module
        }
    }
}

/// Identical fitted items; `count` is the stacking count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FittedGroup {
    pub type_id: TypeId,
    pub source: BonusSource,
    pub count: u32,
}

/// Group items by type, modules before rigs, ascending type ID within each.
///
/// The order is fixed so floating-point composition is reproducible.
pub(crate) fn group_fitted_items(items: &[FittedItem]) -> Vec<FittedGroup> {
    let mut groups: BTreeMap<(BonusSource, TypeId), u32> = BTreeMap::new();
    for item in items {
        *groups.entry((item.source(), item.type_id)).or_default() += 1;
    }

    groups
        .into_iter()
        .map(|((source, type_id), count)| FittedGroup {
            type_id,
            source,
            count,
        })
        .collect()
}
