//! Integration tests for reading and checking entities through the public API.
use climada_entity::cli::template::extract_template;
use climada_entity::entity::{Description, Entity, EntitySource};
use climada_entity::input::EntityCollection;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// Copy the packaged default entity into `dir_path`, renaming exposures with `prefix`
fn write_renamed_template(dir_path: &Path, prefix: &str) {
    extract_template(dir_path).unwrap();
    let exposures_path = dir_path.join("exposures.csv");
    let exposures = fs::read_to_string(&exposures_path).unwrap();
    fs::write(&exposures_path, exposures.replace("loc", prefix)).unwrap();
}

#[test]
fn test_read_extracted_template_matches_default() {
    let dir = tempdir().unwrap();
    let entity_dir = dir.path().join("entity");
    extract_template(&entity_dir).unwrap();

    let entity = Entity::from_source(&EntitySource::Single(entity_dir.clone()), None).unwrap();
    let default = Entity::new();
    assert!(entity.exposures().iter().eq(default.exposures().iter()));
    assert!(entity.impact_funcs().iter().eq(default.impact_funcs().iter()));
    assert!(entity.measures().iter().eq(default.measures().iter()));
    assert!(entity.disc_rates().iter().eq(default.disc_rates().iter()));
    assert_eq!(entity.exposures().tag().file_names(), [entity_dir]);
    entity.check().unwrap();
}

#[test]
fn test_read_many_folders() {
    let dir = tempdir().unwrap();
    let north = dir.path().join("north");
    let south = dir.path().join("south");
    write_renamed_template(&north, "north");
    write_renamed_template(&south, "south");

    let mut entity = Entity::new();
    let default_len = entity.exposures().len();
    entity
        .read(
            &EntitySource::Many(vec![north, south]),
            Some(&Description::Many(vec!["North".into(), "South".into()])),
        )
        .unwrap();
    assert_eq!(entity.exposures().len(), 2 * default_len);
    assert_eq!(entity.exposures().tag().descriptions(), ["North", "South"]);
    entity.check().unwrap();
}

#[test]
fn test_read_duplicate_folders_fails_check() {
    let dir = tempdir().unwrap();
    let entity_dir = dir.path().join("entity");
    extract_template(&entity_dir).unwrap();

    // Reading succeeds, but the same exposure IDs now appear twice
    let entity = Entity::from_source(
        &EntitySource::Many(vec![entity_dir.clone(), entity_dir]),
        None,
    )
    .unwrap();
    assert!(entity.check().is_err());
}

#[test]
fn test_read_failure_leaves_entity_unchanged() {
    let dir = tempdir().unwrap();
    let entity_dir = dir.path().join("entity");
    extract_template(&entity_dir).unwrap();
    fs::remove_file(entity_dir.join("measures.csv")).unwrap();

    let mut entity = Entity::new();
    let before = entity.clone();
    assert!(
        entity
            .read(&EntitySource::Single(entity_dir), None)
            .is_err()
    );
    assert_eq!(entity, before);
}
