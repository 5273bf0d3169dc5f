//! EVE trade-logistics library entry points.
//!
//! This crate exposes helpers to locate the static data export, load dogma
//! and starmap data into memory, compute effective ship attributes (cargo
//! capacity, warp speed, inertia and align time) under skills and fitted
//! modules, route between solar systems, and estimate travel time. Higher
//! level consumers (the CLI) should only depend on the functions exported
//! here instead of reimplementing behavior.

pub mod dataset;
pub mod db;
pub mod dogma;
pub mod error;
pub mod graph;
pub mod path;
pub mod sde;
pub mod ship;
pub mod travel;

pub use dataset::{default_dataset_path, resolve_dataset, DATASET_ENV_VAR, DATASET_FILENAME};
pub use db::{load_starmap, Starmap, System, SystemId, HIGH_SEC_THRESHOLD};
pub use dogma::{
    apply_modifier, apply_modifier_with_stacking, stacking_penalty, ItemEffectProfile,
    ModifierDomain, ModifierInfo, OperationCode,
};
pub use error::{Error, Result};
pub use graph::{build_graph, Graph, GraphOptions};
pub use path::{find_shortest_path, shortest_path, PathResult};
pub use sde::{
    load_dogma_data, load_item_profile, load_static_data, DogmaData, DogmaSource, StaticData,
    TypeInfo,
};
pub use ship::{
    calculate_align_time, calculate_cargo_capacity, calculate_inertia, calculate_warp_speed,
    calculate_warp_speed_au, AlignTime, AppliedBonus, BonusSource, CalculationWarning,
    CharacterSkill, CharacterSkillSet, FittedItem, ShipAttributeResult, MAX_SKILL_LEVEL,
};
pub use travel::{calculate_travel_time, RouteResult, TravelParams, WarpFormula};
