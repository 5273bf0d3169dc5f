//! Common test utilities and fixture helpers.
//!
//! [`FixtureDataset`] writes a small but complete static data export into a
//! temporary directory: a handful of ships, skills, modules and rigs, and a
//! seven-system starmap with mixed security.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use tempfile::TempDir;

pub const NEREUS: i64 = 2998;
pub const BADGER: i64 = 648;
pub const CAPSULE: i64 = 670;
pub const IBIS: i64 = 601;

pub const GALLENTE_HAULER: i64 = 3340;
pub const CALDARI_HAULER: i64 = 3342;
pub const NAVIGATION: i64 = 3449;
pub const EVASIVE_MANEUVERING: i64 = 3453;

pub const EXPANDED_CARGOHOLD: i64 = 1319;
pub const CARGOHOLD_OPTIMIZATION: i64 = 31119;
pub const INERTIAL_STABILIZERS: i64 = 1405;
pub const VELOCITY_OPTIMIZER: i64 = 31153;
pub const BROKEN_WIDGET: i64 = 9999;
pub const ODD_MODULE: i64 = 9998;
pub const UNKNOWN_MODULE: i64 = 123_456;

pub const NEREUS_CAPACITY: f64 = 2700.0;
pub const NEREUS_AGILITY: f64 = 1.1;
pub const NEREUS_MASS: f64 = 11_250_000.0;
pub const NEREUS_BASE_WARP_SPEED: f64 = 3.0;

pub const ALPHA: i64 = 30_000_001;
pub const BRAVO: i64 = 30_000_002;
pub const CHARLIE: i64 = 30_000_003;
pub const DELTA: i64 = 30_000_004;
pub const ECHO: i64 = 30_000_005;
pub const FOXTROT: i64 = 30_000_006;
pub const GOLF: i64 = 30_000_007;

/// A fixture dataset that lives as long as this value.
pub struct FixtureDataset {
    _dir: TempDir,
    pub path: PathBuf,
}

impl FixtureDataset {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join("static_data.db");
        write_fixture(&path);
        Self { _dir: dir, path }
    }

    pub fn dir(&self) -> &Path {
        self._dir.path()
    }
}

fn write_fixture(path: &Path) {
    let conn = Connection::open(path).expect("create fixture database");
    conn.execute_batch(
        "CREATE TABLE types (_key INTEGER PRIMARY KEY, name TEXT, mass REAL, groupID INTEGER);
         CREATE TABLE typeDogma (_key INTEGER PRIMARY KEY, dogmaAttributes TEXT, dogmaEffects TEXT);
         CREATE TABLE dogmaEffects (_key INTEGER PRIMARY KEY, name TEXT, modifierInfo TEXT);
         CREATE TABLE dogmaAttributes (_key INTEGER PRIMARY KEY, name TEXT, stackable INTEGER);
         CREATE TABLE mapRegions (_key INTEGER PRIMARY KEY, name TEXT);
         CREATE TABLE mapSolarSystems (
             solarSystemID INTEGER PRIMARY KEY,
             name TEXT,
             securityStatus REAL,
             regionID INTEGER
         );
         CREATE TABLE mapStargates (_key INTEGER PRIMARY KEY, solarSystemID INTEGER, destination TEXT);",
    )
    .expect("create fixture schema");

    write_types(&conn);
    write_effects(&conn);
    write_attributes(&conn);
    write_starmap(&conn);
}

fn write_types(conn: &Connection) {
    let types: &[(i64, &str, Option<f64>, i64)] = &[
        (NEREUS, r#"{"en":"Nereus","de":"Nereus"}"#, Some(NEREUS_MASS), 28),
        (BADGER, "Badger", Some(10_000_000.0), 28),
        (CAPSULE, "Capsule", Some(32_000.0), 29),
        (IBIS, "Ibis", None, 237),
        (GALLENTE_HAULER, "Gallente Hauler", None, 255),
        (CALDARI_HAULER, "Caldari Hauler", None, 255),
        (NAVIGATION, "Navigation", None, 275),
        (EVASIVE_MANEUVERING, "Evasive Maneuvering", None, 275),
        (EXPANDED_CARGOHOLD, "Expanded Cargohold I", Some(50.0), 765),
        (CARGOHOLD_OPTIMIZATION, "Medium Cargohold Optimization I", None, 781),
        (INERTIAL_STABILIZERS, "Inertial Stabilizers I", None, 762),
        (VELOCITY_OPTIMIZER, "Medium Hyperspatial Velocity Optimizer I", None, 782),
        (BROKEN_WIDGET, "Broken Widget", None, 765),
        (ODD_MODULE, "Odd Module", None, 765),
    ];
    for (type_id, name, mass, group_id) in types {
        conn.execute(
            "INSERT INTO types (_key, name, mass, groupID) VALUES (?1, ?2, ?3, ?4)",
            params![type_id, name, mass, group_id],
        )
        .expect("insert type");
    }

    let dogma: &[(i64, &str, &str)] = &[
        (
            NEREUS,
            r#"[{"attributeID":38,"value":2700.0},{"attributeID":70,"value":1.1},
                {"attributeID":600,"value":1.0},{"attributeID":1281,"value":3.0},
                {"attributeID":182,"value":3340},{"attributeID":4,"value":11250000.0}]"#,
            "[]",
        ),
        (
            BADGER,
            r#"[{"attributeID":38,"value":3900.0},{"attributeID":70,"value":1.0},
                {"attributeID":600,"value":1.0},{"attributeID":182,"value":3342}]"#,
            "[]",
        ),
        (
            IBIS,
            r#"[{"attributeID":70,"value":3.0},{"attributeID":4,"value":1000000.0}]"#,
            "[]",
        ),
        (
            EXPANDED_CARGOHOLD,
            r#"[{"attributeID":149,"value":1.175}]"#,
            r#"[{"effectID":1001,"isDefault":false}]"#,
        ),
        (
            CARGOHOLD_OPTIMIZATION,
            r#"[{"attributeID":614,"value":15.0}]"#,
            r#"[{"effectID":1002,"isDefault":false}]"#,
        ),
        (
            INERTIAL_STABILIZERS,
            r#"[{"attributeID":151,"value":-13.0}]"#,
            r#"[{"effectID":1003,"isDefault":false}]"#,
        ),
        (
            VELOCITY_OPTIMIZER,
            r#"[{"attributeID":624,"value":20.0}]"#,
            r#"[{"effectID":1004,"isDefault":false}]"#,
        ),
        (
            BROKEN_WIDGET,
            r#"[{"attributeID":149,"value":1.5}]"#,
            r#"[{"effectID":1005,"isDefault":false}]"#,
        ),
        (
            ODD_MODULE,
            r#"[{"attributeID":149,"value":1.5},{"attributeID":151,"value":-50.0}]"#,
            r#"[{"effectID":1006,"isDefault":false}]"#,
        ),
    ];
    for (type_id, attributes, effects) in dogma {
        conn.execute(
            "INSERT INTO typeDogma (_key, dogmaAttributes, dogmaEffects) VALUES (?1, ?2, ?3)",
            params![type_id, attributes, effects],
        )
        .expect("insert type dogma");
    }
}

fn write_effects(conn: &Connection) {
    let effects: &[(i64, &str, &str)] = &[
        (
            1001,
            "cargoCapacityMultiply",
            r#"[{"domain":"shipID","func":"ItemModifier","modifiedAttributeID":38,"modifyingAttributeID":149,"operation":4}]"#,
        ),
        (
            1002,
            "cargoCapacityBonus",
            r#"[{"domain":"shipID","func":"ItemModifier","modifiedAttributeID":38,"modifyingAttributeID":614,"operation":6}]"#,
        ),
        (
            1003,
            "agilityBonus",
            r#"[{"domain":"shipID","func":"ItemModifier","modifiedAttributeID":70,"modifyingAttributeID":151,"operation":6}]"#,
        ),
        (
            1004,
            "warpSpeedMultiplierBonus",
            r#"[{"domain":"shipID","func":"ItemModifier","modifiedAttributeID":600,"modifyingAttributeID":624,"operation":6}]"#,
        ),
        (1005, "brokenEffect", "{not json"),
        (
            1006,
            "oddEffect",
            r#"[{"domain":"shipID","func":"ItemModifier","modifiedAttributeID":38,"modifyingAttributeID":149,"operation":12},
                {"domain":"shipID","func":"ItemModifier","modifiedAttributeID":70,"modifyingAttributeID":151,"operation":6}]"#,
        ),
    ];
    for (effect_id, name, modifiers) in effects {
        conn.execute(
            "INSERT INTO dogmaEffects (_key, name, modifierInfo) VALUES (?1, ?2, ?3)",
            params![effect_id, name, modifiers],
        )
        .expect("insert effect");
    }
}

fn write_attributes(conn: &Connection) {
    let attributes: &[(i64, &str, i64)] = &[
        (4, "mass", 0),
        (38, "capacity", 0),
        (70, "agility", 1),
        (149, "cargoCapacityMultiplier", 1),
        (151, "agilityBonus", 1),
        (182, "requiredSkill1", 0),
        (600, "warpSpeedMultiplier", 1),
        (614, "cargoCapacityBonus", 1),
        (624, "WarpSBonus", 1),
        (1281, "baseWarpSpeed", 0),
    ];
    for (attribute_id, name, stackable) in attributes {
        conn.execute(
            "INSERT INTO dogmaAttributes (_key, name, stackable) VALUES (?1, ?2, ?3)",
            params![attribute_id, name, stackable],
        )
        .expect("insert attribute");
    }
}

fn write_starmap(conn: &Connection) {
    conn.execute(
        "INSERT INTO mapRegions (_key, name) VALUES (?1, ?2)",
        params![10_000_001_i64, r#"{"en":"Heartland"}"#],
    )
    .expect("insert region");

    let systems: &[(i64, &str, Option<f64>)] = &[
        (ALPHA, "Alpha", Some(0.9)),
        (BRAVO, "Bravo", Some(0.7)),
        (CHARLIE, "Charlie", Some(0.2)),
        (DELTA, "Delta", Some(0.5)),
        (ECHO, "Echo", Some(0.8)),
        (FOXTROT, "Foxtrot", Some(0.6)),
        (GOLF, "Golf", None),
    ];
    for (system_id, name, security) in systems {
        conn.execute(
            "INSERT INTO mapSolarSystems (solarSystemID, name, securityStatus, regionID)
             VALUES (?1, ?2, ?3, ?4)",
            params![system_id, name, security, 10_000_001_i64],
        )
        .expect("insert system");
    }

    // Shortest Alpha -> Echo crosses low-sec Charlie; the high-sec detour
    // through Bravo and Delta is one jump longer. Foxtrot is isolated.
    let links = [
        (ALPHA, BRAVO),
        (ALPHA, CHARLIE),
        (CHARLIE, ECHO),
        (BRAVO, DELTA),
        (DELTA, ECHO),
        (ECHO, GOLF),
    ];
    let mut gate_id = 50_000_000_i64;
    let mut insert_gate = |from: i64, destination: String| {
        gate_id += 1;
        conn.execute(
            "INSERT INTO mapStargates (_key, solarSystemID, destination) VALUES (?1, ?2, ?3)",
            params![gate_id, from, destination],
        )
        .expect("insert stargate");
    };
    for (a, b) in links {
        insert_gate(a, format!(r#"{{"solarSystemID":{b},"stargateID":1}}"#));
        insert_gate(b, format!(r#"{{"solarSystemID":{a},"stargateID":1}}"#));
    }
    insert_gate(FOXTROT, r#"{"solarSystemID":39999999}"#.to_string());
    insert_gate(FOXTROT, "garbage".to_string());
}
