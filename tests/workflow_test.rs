//! End-to-end folder workflow against a store opened from configuration.

use grimoire_core::config::AppConfig;
use grimoire_core::error::ErrorKind;
use grimoire_core::types::FolderId;
use grimoire_database::migration::run_migrations;
use grimoire_database::{DatabasePool, FolderRepository, SpellRepository};
use grimoire_entity::folder::CreateFolder;
use grimoire_entity::spell::CreateSpell;

struct TestApp {
    db: DatabasePool,
    folders: FolderRepository,
    spells: SpellRepository,
}

impl TestApp {
    async fn new() -> Self {
        let config = AppConfig::load_from("tests/fixtures/test_config.toml")
            .expect("Failed to load test config");
        assert_eq!(config.database.url, "sqlite::memory:");

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        Self {
            folders: FolderRepository::new(db.pool().clone()),
            spells: SpellRepository::new(db.pool().clone()),
            db,
        }
    }
}

#[tokio::test]
async fn test_grimoire_reorganization() {
    let app = TestApp::new().await;
    assert!(app.db.health_check().await.unwrap());

    let school = app
        .folders
        .create(&CreateFolder::new(FolderId::ROOT, "Evocation"))
        .await
        .unwrap();
    let fire = app
        .folders
        .create(&CreateFolder::new(school.id, "Fire"))
        .await
        .unwrap();
    let archive = app
        .folders
        .create(&CreateFolder::new(FolderId::ROOT, "Archive"))
        .await
        .unwrap();
    app.folders
        .create(&CreateFolder::new(archive.id, "Fire"))
        .await
        .unwrap();

    for name in ["Fireball", "Scorching Ray"] {
        app.spells
            .create(&CreateSpell::new(fire.id, name))
            .await
            .unwrap();
    }

    let resolved = app
        .folders
        .find_by_path("/Evocation/Fire")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(resolved.id, fire.id);

    let err = app.folders.move_folder(fire.id, archive.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    app.folders.move_folder(school.id, archive.id).await.unwrap();
    assert_eq!(
        app.folders.get_path(fire.id).await.unwrap(),
        "/Archive/Evocation/Fire"
    );

    let contents = app.folders.get_folder_contents(archive.id).await.unwrap();
    assert_eq!(contents.subfolder_count, 2);
    assert_eq!(contents.total_subfolders_recursive, 3);
    assert_eq!(contents.total_spells_recursive, 2);

    let summary = app.folders.move_contents_to_parent(school.id).await.unwrap();
    assert_eq!(summary.renamed.len(), 1);
    assert_eq!(summary.renamed[0].to, "Fire_1");
    assert_eq!(
        app.folders.get_path(fire.id).await.unwrap(),
        "/Archive/Fire_1"
    );

    let deleted = app.folders.delete_recursive(archive.id).await.unwrap();
    assert_eq!(deleted.folders_deleted, 3);
    assert_eq!(deleted.spells_deleted, 2);

    let tree = app.folders.find_all().await.unwrap();
    assert_eq!(tree.total_folders, 1);
    assert!(app.folders.is_empty(FolderId::ROOT).await.unwrap());

    app.db.close().await;
}
