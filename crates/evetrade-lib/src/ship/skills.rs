//! Character skill levels supplied by callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dogma::TypeId;

use super::constants::MAX_SKILL_LEVEL;

/// One trained skill.
///
/// `active_level` can be lower than `trained_level` when the character's
/// account status caps it; calculators always use the active level. Levels
/// are not validated on construction, see [`CharacterSkillSet::active_level`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSkill {
    pub skill_id: TypeId,
    pub active_level: u8,
    pub trained_level: u8,
}

impl CharacterSkill {
    /// A skill whose active and trained levels are equal.
    pub fn trained(skill_id: TypeId, level: u8) -> Self {
        Self {
            skill_id,
            active_level: level,
            trained_level: level,
        }
    }
}

/// Skills of a character, unique per skill ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterSkillSet {
    skills: BTreeMap<TypeId, CharacterSkill>,
}

impl CharacterSkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a skill.
    pub fn insert(&mut self, skill: CharacterSkill) {
        self.skills.insert(skill.skill_id, skill);
    }

    /// Builder-style [`insert`](Self::insert) of a fully trained skill.
    pub fn with_skill(mut self, skill_id: TypeId, level: u8) -> Self {
        self.insert(CharacterSkill::trained(skill_id, level));
        self
    }

    pub fn get(&self, skill_id: TypeId) -> Option<&CharacterSkill> {
        self.skills.get(&skill_id)
    }

    /// Active level of a skill; `None` when absent or untrained (level 0).
    ///
    /// Clamped to the trained level and to [`MAX_SKILL_LEVEL`], so an
    /// out-of-range input can never push a per-level bonus past its maximum.
    pub fn active_level(&self, skill_id: TypeId) -> Option<u8> {
        self.get(skill_id)
            .map(|skill| {
                skill
                    .active_level
                    .min(skill.trained_level)
                    .min(MAX_SKILL_LEVEL)
            })
            .filter(|level| *level > 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CharacterSkill> {
        self.skills.values()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl FromIterator<CharacterSkill> for CharacterSkillSet {
    fn from_iter<I: IntoIterator<Item = CharacterSkill>>(iter: I) -> Self {
        let mut set = Self::new();
        for skill in iter {
            set.insert(skill);
        }
        set
    }
}
