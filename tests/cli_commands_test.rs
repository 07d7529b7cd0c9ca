//! End-to-end tests of command dispatch against a temporary data directory

use std::path::Path;

use clap::Parser;
use tempfile::TempDir;

use wishlist::cli::commands::{execute_command, write_config_template};
use wishlist::cli::{Cli, CliError};
use wishlist::config::Settings;
use wishlist::exitcode;
use wishlist::infrastructure::traits::RealFileSystem;
use wishlist::util::testing;

fn run(data_dir: &Path, args: &[&str]) -> Result<(), CliError> {
    testing::init_test_setup();
    let dir = data_dir.to_string_lossy().to_string();
    let mut argv = vec!["wishlist", "--data-dir", dir.as_str()];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    execute_command(&cli)
}

fn stored_phases(data_dir: &Path) -> serde_json::Value {
    let raw = std::fs::read_to_string(data_dir.join("wishlist")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn given_phase_add_commands_when_executed_then_persisted_in_order() {
    // Arrange
    let temp = TempDir::new().unwrap();

    // Act
    run(temp.path(), &["phase", "add", "Shopping"]).unwrap();
    run(temp.path(), &["phase", "add", "Moving"]).unwrap();
    run(temp.path(), &["phase", "move", "1", "0"]).unwrap();

    // Assert
    let phases = stored_phases(temp.path());
    assert_eq!(phases[0]["title"], "Moving");
    assert_eq!(phases[1]["title"], "Shopping");
}

#[test]
fn given_item_when_deleted_by_id_then_parent_resolved() {
    // Arrange
    let temp = TempDir::new().unwrap();
    run(temp.path(), &["phase", "add", "Shopping"]).unwrap();
    let phase_id = stored_phases(temp.path())[0]["id"]
        .as_str()
        .unwrap()
        .to_string();
    run(temp.path(), &["section", "add", phase_id.as_str(), "Tech"]).unwrap();
    let section_id = stored_phases(temp.path())[0]["sections"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();
    run(temp.path(), &["item", "add", section_id.as_str(), "Mouse", "-n", "cheap"]).unwrap();
    let item_id = stored_phases(temp.path())[0]["sections"][0]["items"][0]["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Act
    run(temp.path(), &["item", "edit", item_id.as_str(), "--name", "Trackball"]).unwrap();
    let edited = stored_phases(temp.path());
    run(temp.path(), &["item", "delete", item_id.as_str()]).unwrap();

    // Assert
    let item = &edited[0]["sections"][0]["items"][0];
    assert_eq!(item["name"], "Trackball");
    assert_eq!(item["note"], "cheap");
    let items = &stored_phases(temp.path())[0]["sections"][0]["items"];
    assert_eq!(items.as_array().unwrap().len(), 0);
}

#[test]
fn given_unknown_phase_when_renaming_then_data_error_exit_code() {
    // Arrange
    let temp = TempDir::new().unwrap();

    // Act
    let err = run(temp.path(), &["phase", "rename", "ghost", "New"]).unwrap_err();

    // Assert
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[test]
fn given_blank_title_when_adding_phase_then_usage_exit_code() {
    // Arrange
    let temp = TempDir::new().unwrap();

    // Act
    let err = run(temp.path(), &["phase", "add", "  "]).unwrap_err();

    // Assert
    assert_eq!(err.exit_code(), exitcode::USAGE);
    assert!(!temp.path().join("wishlist").exists());
}

#[test]
fn given_reset_without_yes_when_executed_then_refused() {
    // Arrange
    let temp = TempDir::new().unwrap();
    run(temp.path(), &["phase", "add", "Keep"]).unwrap();

    // Act
    let refused = run(temp.path(), &["reset"]);
    run(temp.path(), &["reset", "--yes"]).unwrap();

    // Assert
    assert!(matches!(refused, Err(CliError::Usage(_))));
    assert!(!temp.path().join("wishlist").exists());
}

#[test]
fn given_export_command_when_executed_then_file_written() {
    // Arrange
    let temp = TempDir::new().unwrap();
    run(temp.path(), &["phase", "add", "Shopping"]).unwrap();
    let target = temp.path().join("export").join("out.json");
    let target_arg = target.to_string_lossy().to_string();

    // Act
    run(temp.path(), &["export", "-o", target_arg.as_str()]).unwrap();

    // Assert
    let exported: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(exported, stored_phases(temp.path()));
}

#[test]
fn given_ephemeral_flag_when_adding_phase_then_nothing_written() {
    // Arrange
    let temp = TempDir::new().unwrap();

    // Act
    run(temp.path(), &["--ephemeral", "phase", "add", "Draft"]).unwrap();

    // Assert
    assert!(!temp.path().join("wishlist").exists());
}

#[test]
fn given_env_var_in_data_dir_flag_when_executed_then_expanded() {
    // Arrange
    testing::init_test_setup();
    let temp = TempDir::new().unwrap();
    std::env::set_var("CLI_TEST_WISHLIST_ROOT", temp.path());
    let cli = Cli::try_parse_from([
        "wishlist",
        "--data-dir",
        "$CLI_TEST_WISHLIST_ROOT/data",
        "phase",
        "add",
        "Shopping",
    ])
    .unwrap();

    // Act
    execute_command(&cli).unwrap();

    // Assert
    let phases = stored_phases(&temp.path().join("data"));
    assert_eq!(phases[0]["title"], "Shopping");
}

#[test]
fn given_missing_config_when_writing_template_then_created_with_parents() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config").join("wishlist.toml");

    // Act
    write_config_template(&RealFileSystem, &path, false).unwrap();

    // Assert
    assert_eq!(std::fs::read_to_string(&path).unwrap(), Settings::template());
}

#[test]
fn given_existing_config_when_writing_template_then_kept_unless_forced() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("wishlist.toml");
    std::fs::write(&path, "phases_key = \"mine\"\n").unwrap();

    // Act
    let refused = write_config_template(&RealFileSystem, &path, false);
    let kept = std::fs::read_to_string(&path).unwrap();
    write_config_template(&RealFileSystem, &path, true).unwrap();

    // Assert
    assert!(matches!(refused, Err(CliError::Usage(_))));
    assert_eq!(kept, "phases_key = \"mine\"\n");
    assert_eq!(std::fs::read_to_string(&path).unwrap(), Settings::template());
}
