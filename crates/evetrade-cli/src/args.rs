//! Parsers for the repeatable `--skill` and `--fit` arguments.

use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Error, Result};
use clap::Args;

use evetrade_lib::{CharacterSkillSet, FittedItem, MAX_SKILL_LEVEL};

/// Ship, skills and fitting shared by every ship-based command.
#[derive(Args, Debug, Clone)]
pub struct ShipArgs {
    /// Ship type ID.
    #[arg(long)]
    pub ship: i64,
    /// Skill as SKILL_ID=LEVEL; repeat for several skills.
    #[arg(long = "skill", value_name = "SKILL_ID=LEVEL")]
    pub skills: Vec<SkillArg>,
    /// Fitted item as TYPE_ID@SLOT; repeat for several items. Slots whose
    /// name starts with "Rig" hold rigs.
    #[arg(long = "fit", value_name = "TYPE_ID@SLOT")]
    pub fits: Vec<FitArg>,
}

impl ShipArgs {
    pub fn skill_set(&self) -> CharacterSkillSet {
        skill_set(&self.skills)
    }

    pub fn fitted_items(&self) -> Vec<FittedItem> {
        fitted_items(&self.fits)
    }
}

/// `SKILL_ID=LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillArg {
    pub skill_id: i64,
    pub level: u8,
}

impl FromStr for SkillArg {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (id, level) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected SKILL_ID=LEVEL, got '{s}'"))?;
        let skill_id = id
            .trim()
            .parse()
            .with_context(|| format!("invalid skill id '{id}'"))?;
        let level: u8 = level
            .trim()
            .parse()
            .with_context(|| format!("invalid skill level '{level}'"))?;
        if level > MAX_SKILL_LEVEL {
            bail!("skill level must be between 0 and {MAX_SKILL_LEVEL}, got {level}");
        }
        Ok(Self { skill_id, level })
    }
}

/// `TYPE_ID@SLOT`, or a bare `TYPE_ID` fitted to a low slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitArg {
    pub type_id: i64,
    pub slot: String,
}

impl FromStr for FitArg {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (id, slot) = match s.split_once('@') {
            Some((id, slot)) if !slot.trim().is_empty() => (id, slot.trim()),
            Some(_) => bail!("missing slot name in '{s}'"),
            None => (s, "LoSlot0"),
        };
        let type_id = id
            .trim()
            .parse()
            .with_context(|| format!("invalid type id '{id}'"))?;
        Ok(Self {
            type_id,
            slot: slot.to_string(),
        })
    }
}

/// Collect skill arguments; a repeated skill keeps its last level.
pub fn skill_set(skills: &[SkillArg]) -> CharacterSkillSet {
    skills.iter().fold(CharacterSkillSet::new(), |set, skill| {
        set.with_skill(skill.skill_id, skill.level)
    })
}

pub fn fitted_items(fits: &[FitArg]) -> Vec<FittedItem> {
    fits.iter()
        .map(|fit| FittedItem::new(fit.type_id, fit.slot.clone()))
        .collect()
}
