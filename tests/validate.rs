//! Integration tests for the `validate` command.
use climada_entity::cli::handle_validate_command;
use climada_entity::cli::template::extract_template;
use climada_entity::entity::{Description, EntitySource};
use climada_entity::log::is_logger_initialised;
use climada_entity::settings::Settings;
use tempfile::tempdir;

/// An integration test for the `validate` command.
///
/// We also check that the logger is initialised after it is run.
#[test]
fn test_handle_validate_command() {
    unsafe { std::env::set_var("CLIMADA_LOG_LEVEL", "off") };

    let dir = tempdir().unwrap();
    let entity_dir = dir.path().join("entity");
    extract_template(&entity_dir).unwrap();

    assert!(!is_logger_initialised());

    let source = EntitySource::Single(entity_dir);
    let description = Description::Single("Florida template".into());
    handle_validate_command(&source, Some(&description), Some(Settings::default())).unwrap();

    assert!(is_logger_initialised());
}
