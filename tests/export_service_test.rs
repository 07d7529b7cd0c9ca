//! Tests for ExportService and the service container wiring

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use wishlist::application::services::ExportService;
use wishlist::config::Settings;
use wishlist::domain::{Phase, SequentialIdGenerator};
use wishlist::infrastructure::di::ServiceContainer;
use wishlist::infrastructure::traits::{FileKeyValueStore, RealFileSystem};
use wishlist::util::testing;

fn container(temp: &TempDir) -> ServiceContainer {
    testing::init_test_setup();
    let settings = Settings {
        data_dir: temp.path().join("data"),
        export_file: temp.path().join("out").join("wishlist.json"),
        ..Settings::default()
    };
    let kv = Arc::new(FileKeyValueStore::new(settings.data_dir.clone()));
    ServiceContainer::with_deps(
        settings,
        Arc::new(RealFileSystem),
        kv,
        Arc::new(SequentialIdGenerator::new("e")),
    )
}

#[test]
fn given_wishlist_when_exporting_then_file_parses_back_to_phases() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let container = container(&temp);
    let mut wishlist = container.wishlist().unwrap();
    let phase = wishlist.add_phase("Shopping").unwrap();
    let section = wishlist.add_section(&phase.id, "Tech").unwrap();
    wishlist
        .add_item(&section.id, "Headphones", "https://example.com", "")
        .unwrap();
    let target = container.settings.export_file.clone();

    // Act
    container.export().write(wishlist.phases(), &target).unwrap();

    // Assert
    let content = fs::read_to_string(&target).unwrap();
    assert!(content.contains("\n  "), "export should be indented");
    let parsed: Vec<Phase> = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed, wishlist.phases());
}

#[test]
fn given_empty_wishlist_when_exporting_then_empty_array() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let container = container(&temp);
    let wishlist = container.wishlist().unwrap();

    // Act
    let json = ExportService::to_json(wishlist.phases()).unwrap();

    // Assert
    assert_eq!(json, "[]");
}

#[test]
fn given_saved_session_when_container_reopens_then_state_is_shared_through_files() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let first = container(&temp);
    let mut wishlist = first.wishlist().unwrap();
    wishlist.add_phase("Moving").unwrap();
    wishlist.toggle_theme().unwrap();

    // Act
    let second = container(&temp).wishlist().unwrap();

    // Assert
    assert_eq!(second.phases().len(), 1);
    assert_eq!(second.phases()[0].title, "Moving");
    assert_eq!(second.theme(), wishlist.theme());
    assert!(temp.path().join("data").join("wishlist").exists());
}
