mod common;

use common::*;
use evetrade_lib::{
    load_dogma_data, load_item_profile, load_starmap, load_static_data, resolve_dataset,
    DogmaSource, Error, ModifierDomain, OperationCode, DATASET_FILENAME,
};
use rusqlite::Connection;

#[test]
fn loads_dogma_and_starmap_from_one_file() {
    let fixture = FixtureDataset::new();
    let data = load_static_data(&fixture.path).expect("fixture loads");

    assert_eq!(data.dogma.type_count(), 14);
    assert_eq!(data.dogma.effect_count(), 6);
    assert_eq!(data.starmap.systems.len(), 7);
}

#[test]
fn localized_names_are_decoded() {
    let fixture = FixtureDataset::new();
    let data = load_static_data(&fixture.path).expect("fixture loads");

    let nereus = data.dogma.type_info(NEREUS).expect("nereus");
    assert_eq!(nereus.name, "Nereus");
    assert_eq!(nereus.mass, Some(NEREUS_MASS));
    assert_eq!(nereus.attribute(38), Some(NEREUS_CAPACITY));

    let alpha = &data.starmap.systems[&ALPHA];
    assert_eq!(alpha.metadata.region_name.as_deref(), Some("Heartland"));
    assert_eq!(alpha.metadata.security_status, Some(0.9));
}

#[test]
fn stargates_become_directed_edges_and_bad_rows_are_skipped() {
    let fixture = FixtureDataset::new();
    let starmap = load_starmap(&fixture.path).expect("fixture loads");

    assert_eq!(starmap.adjacency.get(&ALPHA), Some(&vec![BRAVO, CHARLIE]));
    assert_eq!(starmap.adjacency.get(&GOLF), Some(&vec![ECHO]));
    assert!(starmap.adjacency.get(&FOXTROT).is_none());
    assert_eq!(starmap.system_id_by_name("Foxtrot"), Some(FOXTROT));
    assert_eq!(starmap.system_name(GOLF), Some("Golf"));
}

#[test]
fn item_profiles_carry_typed_modifiers() {
    let fixture = FixtureDataset::new();
    let dogma = load_dogma_data(&fixture.path).expect("fixture loads");

    let profile = load_item_profile(&dogma, EXPANDED_CARGOHOLD).expect("profile");
    assert_eq!(profile.name, "Expanded Cargohold I");
    assert_eq!(profile.attribute(149), Some(1.175));
    assert!(!profile.stackable, "capacity is not stacking penalized");

    let modifiers: Vec<_> = profile.modifiers_for(38).collect();
    assert_eq!(modifiers.len(), 1);
    assert_eq!(modifiers[0].domain, ModifierDomain::Ship);
    assert_eq!(modifiers[0].operation, OperationCode::PostMulCount);
    assert_eq!(modifiers[0].modifying_attribute_id, 149);

    let stabilizer = load_item_profile(&dogma, INERTIAL_STABILIZERS).expect("profile");
    assert!(stabilizer.stackable);

    assert!(load_item_profile(&dogma, GALLENTE_HAULER).is_none());
    assert!(load_item_profile(&dogma, UNKNOWN_MODULE).is_none());
}

#[test]
fn malformed_effects_are_kept_as_issues() {
    let fixture = FixtureDataset::new();
    let dogma = load_dogma_data(&fixture.path).expect("fixture loads");

    let broken = dogma.effect(1005).expect("broken effect present");
    assert!(broken.modifiers.is_empty());
    assert_eq!(broken.issues.len(), 1);

    let odd = dogma.effect(1006).expect("odd effect present");
    assert_eq!(odd.modifiers.len(), 1);
    assert_eq!(odd.issues[0].modified_attribute_id, Some(38));
}

#[test]
fn stackable_flags_are_loaded() {
    let fixture = FixtureDataset::new();
    let dogma = load_dogma_data(&fixture.path).expect("fixture loads");

    assert_eq!(dogma.attribute_stackable(38), Some(false));
    assert_eq!(dogma.attribute_stackable(70), Some(true));
    assert_eq!(dogma.attribute_stackable(9_999_999), None);
}

#[test]
fn missing_dataset_is_reported() {
    let fixture = FixtureDataset::new();
    let missing = fixture.dir().join("missing.db");

    let err = load_static_data(&missing).expect_err("missing file");
    assert!(matches!(err, Error::DatasetNotFound { .. }));
}

#[test]
fn file_that_is_not_a_database_is_a_sqlite_error() {
    let fixture = FixtureDataset::new();
    let path = fixture.dir().join("not_a_database.db");
    std::fs::write(&path, "these bytes are not an SQLite header, just plain text\n".repeat(64))
        .expect("write file");

    let err = load_static_data(&path).expect_err("not sqlite");
    assert!(matches!(err, Error::Sqlite(_)), "{err:?}");
}

#[test]
fn missing_required_table_is_unsupported_schema() {
    let fixture = FixtureDataset::new();
    let path = fixture.dir().join("partial.db");
    let conn = Connection::open(&path).expect("create db");
    conn.execute_batch(
        "CREATE TABLE types (_key INTEGER PRIMARY KEY, name TEXT, mass REAL, groupID INTEGER);",
    )
    .expect("schema");
    drop(conn);

    let err = load_dogma_data(&path).expect_err("incomplete schema");
    assert!(matches!(err, Error::UnsupportedSchema { table } if table == "typeDogma"));

    let err = load_starmap(&path).expect_err("no starmap tables");
    assert!(matches!(err, Error::UnsupportedSchema { table } if table == "mapSolarSystems"));
}

#[test]
fn dataset_directory_resolves_to_default_filename() {
    let fixture = FixtureDataset::new();

    let resolved = resolve_dataset(Some(fixture.dir())).expect("resolves");
    assert_eq!(resolved, fixture.dir().join(DATASET_FILENAME));
    assert_eq!(resolved, fixture.path);
}
