//! Integration tests for content aggregation and the two deletion strategies.

mod helpers;

use grimoire_core::error::ErrorKind;
use grimoire_core::types::FolderId;
use grimoire_entity::folder::RenamedFolder;
use grimoire_entity::folder::model::MAX_FOLDER_NAME_LEN;

use helpers::TestStore;

#[tokio::test]
async fn test_recursive_counts() {
    let store = TestStore::new().await;
    let a = store.folder(FolderId::ROOT, "A").await;
    let b = store.folder(a.id, "B").await;
    for name in ["Fire Bolt", "Light"] {
        store.spell(a.id, name).await;
    }
    for name in ["Shield", "Sleep", "Grease"] {
        store.spell(b.id, name).await;
    }

    let contents = store.folders.get_folder_contents(a.id).await.unwrap();

    assert_eq!(contents.folder.path, "/A");
    assert_eq!(contents.spell_count, 2);
    assert_eq!(contents.total_spells_recursive, 5);
    assert_eq!(contents.subfolder_count, 1);
    assert_eq!(contents.total_subfolders_recursive, 1);
    assert_eq!(contents.subfolders.len(), 1);
    assert_eq!(contents.subfolders[0].folder.id, b.id);
    assert_eq!(contents.subfolders[0].path, "/A/B");
    assert!(!contents.is_empty());
}

#[tokio::test]
async fn test_recursive_counts_span_whole_subtree() {
    let store = TestStore::new().await;
    let a = store.folder(FolderId::ROOT, "A").await;
    let b = store.folder(a.id, "B").await;
    let c = store.folder(b.id, "C").await;
    let d = store.folder(c.id, "D").await;
    let e = store.folder(a.id, "E").await;
    store.spell(d.id, "Wish").await;
    store.spell(e.id, "Mending").await;
    store.spell(FolderId::ROOT, "Outside").await;

    let contents = store.folders.get_folder_contents(a.id).await.unwrap();
    assert_eq!(contents.spell_count, 0);
    assert_eq!(contents.subfolder_count, 2);
    assert_eq!(contents.total_subfolders_recursive, 4);
    assert_eq!(contents.total_spells_recursive, 2);

    let names: Vec<&str> = contents
        .subfolders
        .iter()
        .map(|sub| sub.folder.name.as_str())
        .collect();
    assert_eq!(names, vec!["B", "E"]);

    let root = store.folders.get_folder_contents(FolderId::ROOT).await.unwrap();
    assert_eq!(root.folder.path, "/");
    assert_eq!(root.total_subfolders_recursive, 5);
    assert_eq!(root.total_spells_recursive, 3);

    let leaf = store.folders.get_folder_contents(d.id).await.unwrap();
    assert_eq!(leaf.total_subfolders_recursive, 0);
    assert_eq!(leaf.total_spells_recursive, 1);
}

#[tokio::test]
async fn test_contents_of_missing_folder() {
    let store = TestStore::new().await;
    let err = store
        .folders
        .get_folder_contents(FolderId(31))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_delete_recursive_purges_subtree() {
    let store = TestStore::new().await;
    let a = store.folder(FolderId::ROOT, "A").await;
    let b = store.folder(a.id, "B").await;
    let spell = store.spell(b.id, "Fireball").await;
    let top = store.spell(a.id, "Haste").await;
    let sibling = store.folder(FolderId::ROOT, "Sibling").await;
    let kept = store.spell(sibling.id, "Counterspell").await;

    let summary = store.folders.delete_recursive(a.id).await.unwrap();
    assert_eq!(summary.folder_id, a.id);
    assert_eq!(summary.folders_deleted, 2);
    assert_eq!(summary.spells_deleted, 2);

    assert!(store.folders.find_by_id(a.id).await.unwrap().is_none());
    assert!(store.folders.find_by_id(b.id).await.unwrap().is_none());
    assert!(store.spells.find_by_id(spell.id).await.unwrap().is_none());
    assert!(store.spells.find_by_id(top.id).await.unwrap().is_none());

    assert!(store.folders.exists(sibling.id).await.unwrap());
    assert!(store.spells.find_by_id(kept.id).await.unwrap().is_some());
    store.assert_no_orphaned_spells().await;
}

#[tokio::test]
async fn test_delete_recursive_rejects_root_and_missing() {
    let store = TestStore::new().await;
    store.folder(FolderId::ROOT, "A").await;

    let err = store.folders.delete_recursive(FolderId::ROOT).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidOperation);
    assert_eq!(store.folders.find_all().await.unwrap().total_folders, 2);

    let err = store.folders.delete_recursive(FolderId(999)).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_move_contents_to_parent() {
    let store = TestStore::new().await;
    let existing_b = store.folder(FolderId::ROOT, "B").await;
    let a = store.folder(FolderId::ROOT, "A").await;
    let spell = store.spell(a.id, "Magic Missile").await;
    let b = store.folder(a.id, "B").await;
    let nested = store.folder(b.id, "Nested").await;
    let nested_spell = store.spell(nested.id, "Invisibility").await;

    let summary = store.folders.move_contents_to_parent(a.id).await.unwrap();
    assert_eq!(summary.folder_id, a.id);
    assert_eq!(summary.target_id, FolderId::ROOT);
    assert_eq!(summary.spells_moved, 1);
    assert_eq!(summary.folders_moved, 1);
    assert_eq!(
        summary.renamed,
        vec![RenamedFolder {
            id: b.id,
            from: "B".to_string(),
            to: "B_1".to_string(),
        }]
    );

    assert!(store.folders.find_by_id(a.id).await.unwrap().is_none());

    let spell = store.spells.find_by_id(spell.id).await.unwrap().unwrap();
    assert_eq!(spell.folder_id, FolderId::ROOT);

    let moved = store.folders.find_by_id(b.id).await.unwrap().unwrap();
    assert_eq!(moved.parent_id, Some(FolderId::ROOT));
    assert_eq!(moved.name, "B_1");

    let untouched = store.folders.find_by_id(existing_b.id).await.unwrap().unwrap();
    assert_eq!(untouched.name, "B");

    // Deeper levels travel with their parent.
    assert_eq!(
        store.folders.get_path(nested.id).await.unwrap(),
        "/B_1/Nested"
    );
    let nested_spell = store.spells.find_by_id(nested_spell.id).await.unwrap().unwrap();
    assert_eq!(nested_spell.folder_id, nested.id);

    store.assert_no_orphaned_spells().await;
}

#[tokio::test]
async fn test_move_contents_without_collisions_keeps_names() {
    let store = TestStore::new().await;
    let a = store.folder(FolderId::ROOT, "A").await;
    let b = store.folder(a.id, "B").await;
    let c = store.folder(b.id, "C").await;
    let x = store.folder(c.id, "X").await;
    store.spell(c.id, "Sending").await;

    let summary = store.folders.move_contents_to_parent(c.id).await.unwrap();
    assert!(summary.renamed.is_empty());
    assert_eq!(summary.target_id, b.id);

    assert_eq!(store.folders.get_path(x.id).await.unwrap(), "/A/B/X");
    assert_eq!(store.spells.count_in_folder(b.id).await.unwrap(), 1);
    store.assert_no_orphaned_spells().await;
}

#[tokio::test]
async fn test_move_contents_checks_live_names_across_the_batch() {
    let store = TestStore::new().await;
    store.folder(FolderId::ROOT, "X").await;
    let a = store.folder(FolderId::ROOT, "A").await;
    let first = store.folder(a.id, "X").await;
    let second = store.folder(a.id, "X_1").await;

    let summary = store.folders.move_contents_to_parent(a.id).await.unwrap();

    assert_eq!(
        summary.renamed,
        vec![
            RenamedFolder {
                id: first.id,
                from: "X".to_string(),
                to: "X_1".to_string(),
            },
            RenamedFolder {
                id: second.id,
                from: "X_1".to_string(),
                to: "X_1_1".to_string(),
            },
        ]
    );
    assert_eq!(store.child_names(FolderId::ROOT).await, vec!["X", "X_1", "X_1_1"]);
}

#[tokio::test]
async fn test_move_contents_skips_taken_suffixes() {
    let store = TestStore::new().await;
    store.folder(FolderId::ROOT, "Tomes").await;
    store.folder(FolderId::ROOT, "Tomes_1").await;
    let a = store.folder(FolderId::ROOT, "A").await;
    let tomes = store.folder(a.id, "Tomes").await;

    store.folders.move_contents_to_parent(a.id).await.unwrap();

    let moved = store.folders.find_by_id(tomes.id).await.unwrap().unwrap();
    assert_eq!(moved.name, "Tomes_2");
}

#[tokio::test]
async fn test_move_contents_rejects_root_and_missing() {
    let store = TestStore::new().await;
    store.spell(FolderId::ROOT, "Prestidigitation").await;

    let err = store
        .folders
        .move_contents_to_parent(FolderId::ROOT)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidOperation);
    assert_eq!(store.spells.count_in_folder(FolderId::ROOT).await.unwrap(), 1);

    let err = store
        .folders
        .move_contents_to_parent(FolderId(404))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_move_contents_frees_the_dissolved_name() {
    let store = TestStore::new().await;
    let outer = store.folder(FolderId::ROOT, "A").await;
    let inner = store.folder(outer.id, "A").await;
    let spell = store.spell(inner.id, "Mage Hand").await;

    let summary = store.folders.move_contents_to_parent(outer.id).await.unwrap();
    assert!(summary.renamed.is_empty());

    assert!(store.folders.find_by_id(outer.id).await.unwrap().is_none());
    assert_eq!(store.folders.get_path(inner.id).await.unwrap(), "/A");
    let spell = store.spells.find_by_id(spell.id).await.unwrap().unwrap();
    assert_eq!(spell.folder_id, inner.id);
    store.assert_no_orphaned_spells().await;
}

#[tokio::test]
async fn test_move_contents_keeps_renamed_folders_within_name_limit() {
    let store = TestStore::new().await;
    let long = "L".repeat(MAX_FOLDER_NAME_LEN);
    store.folder(FolderId::ROOT, &long).await;
    let a = store.folder(FolderId::ROOT, "A").await;
    let child = store.folder(a.id, &long).await;

    let summary = store.folders.move_contents_to_parent(a.id).await.unwrap();
    let new_name = &summary.renamed[0].to;
    assert_eq!(new_name.chars().count(), MAX_FOLDER_NAME_LEN);
    assert!(new_name.ends_with("L_1"));

    let renamed = store.folders.rename(child.id, new_name).await.unwrap();
    assert_eq!(&renamed.name, new_name);
}

#[tokio::test]
async fn test_move_contents_rolls_back_when_interrupted() {
    let store = TestStore::new().await;
    store.folder(FolderId::ROOT, "C").await;
    let a = store.folder(FolderId::ROOT, "A").await;
    let spell = store.spell(a.id, "Knock").await;
    let b = store.folder(a.id, "B").await;
    let c = store.folder(a.id, "C").await;

    // B is hoisted first; renaming C to C_1 then fails.
    sqlx::query(
        "CREATE TRIGGER interrupt_hoist BEFORE UPDATE ON folders \
         WHEN NEW.name = 'C_1' BEGIN SELECT RAISE(ABORT, 'interrupted'); END",
    )
    .execute(store.db.pool())
    .await
    .unwrap();

    let err = store
        .folders
        .move_contents_to_parent(a.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Database);

    assert!(store.folders.exists(a.id).await.unwrap());
    let spell = store.spells.find_by_id(spell.id).await.unwrap().unwrap();
    assert_eq!(spell.folder_id, a.id);
    for (folder, name) in [(&b, "B"), (&c, "C")] {
        let unchanged = store.folders.find_by_id(folder.id).await.unwrap().unwrap();
        assert_eq!(unchanged.parent_id, Some(a.id));
        assert_eq!(unchanged.name, name);
    }
    assert_eq!(store.child_names(FolderId::ROOT).await, vec!["A", "C"]);
    store.assert_no_orphaned_spells().await;
}

#[tokio::test]
async fn test_delete_recursive_rolls_back_when_interrupted() {
    let store = TestStore::new().await;
    let a = store.folder(FolderId::ROOT, "A").await;
    let b = store.folder(a.id, "B").await;
    let top = store.spell(a.id, "Haste").await;
    let nested = store.spell(b.id, "Slow").await;

    // Spells are gone by the time the folder rows are deleted.
    sqlx::query(&format!(
        "CREATE TRIGGER interrupt_delete BEFORE DELETE ON folders \
         WHEN OLD.id = {} BEGIN SELECT RAISE(ABORT, 'interrupted'); END",
        a.id
    ))
    .execute(store.db.pool())
    .await
    .unwrap();

    let err = store.folders.delete_recursive(a.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Database);

    assert!(store.folders.exists(a.id).await.unwrap());
    assert!(store.folders.exists(b.id).await.unwrap());
    assert_eq!(
        store.spells.find_by_id(top.id).await.unwrap().unwrap().folder_id,
        a.id
    );
    assert_eq!(
        store.spells.find_by_id(nested.id).await.unwrap().unwrap().folder_id,
        b.id
    );
    assert_eq!(store.folders.get_path(b.id).await.unwrap(), "/A/B");
}
