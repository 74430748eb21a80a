use smilcatalog::{Catalog, SqliteCatalog, VideoRecord};
use tempfile::TempDir;

/// Crée un catalogue temporaire pour les tests
fn create_test_catalog() -> (TempDir, SqliteCatalog) {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("catalog").join("test.db");
    let catalog = SqliteCatalog::open(&db_path).unwrap();
    (temp_dir, catalog)
}

fn video(name: &str) -> VideoRecord {
    VideoRecord {
        name: Some(name.to_string()),
        duration: Some(10),
        ..Default::default()
    }
}

#[test]
fn test_open_creates_database() {
    let temp_dir = tempfile::tempdir().unwrap();
    let db_path = temp_dir.path().join("nested").join("catalog.db");
    let catalog = SqliteCatalog::open(&db_path);
    assert!(catalog.is_ok());
    assert!(db_path.exists());
}

#[tokio::test]
async fn test_active_tenants_filters_inactive_and_missing_email() {
    let (_temp_dir, catalog) = create_test_catalog();

    catalog
        .insert_account(1, Some("alice@example.com"), true, Some(2))
        .unwrap();
    catalog.insert_account(2, Some("bob@example.com"), false, None).unwrap();
    catalog.insert_account(3, None, true, None).unwrap();
    catalog.insert_account(4, Some("dave@example.com"), true, None).unwrap();

    let accounts = catalog.active_tenants().await.unwrap();
    let ids: Vec<i64> = accounts.iter().map(|a| a.tenant_id).collect();
    assert_eq!(ids, vec![1, 4]);
    assert_eq!(accounts[0].server_id, Some(2));
    assert_eq!(accounts[1].server_id, None);
}

#[tokio::test]
async fn test_active_tenants_are_distinct() {
    let (_temp_dir, catalog) = create_test_catalog();

    // Deux comptes streaming identiques pour le même tenant
    catalog.insert_account(5, Some("eve@example.com"), true, Some(1)).unwrap();
    catalog.insert_account(5, Some("eve@example.com"), true, Some(1)).unwrap();

    let accounts = catalog.active_tenants().await.unwrap();
    assert_eq!(accounts.len(), 1);
}

#[tokio::test]
async fn test_playlists_are_ordered_and_scoped_to_tenant() {
    let (_temp_dir, catalog) = create_test_catalog();

    let first = catalog.insert_playlist(1, Some("Morning")).unwrap();
    catalog.insert_playlist(2, Some("Other tenant")).unwrap();
    let second = catalog.insert_playlist(1, None).unwrap();

    let playlists = catalog.playlists_for_tenant(1).await.unwrap();
    let ids: Vec<i64> = playlists.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![first, second]);
    assert_eq!(playlists[0].name.as_deref(), Some("Morning"));
    assert_eq!(playlists[1].name, None);
}

#[tokio::test]
async fn test_videos_are_restricted_to_tenant() {
    let (_temp_dir, catalog) = create_test_catalog();

    let playlist = catalog.insert_playlist(1, Some("Mixed")).unwrap();
    catalog.insert_video(playlist, 1, &video("a.mp4")).unwrap();
    catalog.insert_video(playlist, 2, &video("leak.mp4")).unwrap();
    catalog.insert_video(playlist, 1, &video("b.mp4")).unwrap();

    let videos = catalog.videos_for_playlist(playlist, 1).await.unwrap();
    let names: Vec<_> = videos.iter().map(|v| v.name.as_deref().unwrap()).collect();
    assert_eq!(names, vec!["a.mp4", "b.mp4"]);
}

#[tokio::test]
async fn test_video_optional_columns_round_through_nulls() {
    let (_temp_dir, catalog) = create_test_catalog();

    let playlist = catalog.insert_playlist(1, Some("Nulls")).unwrap();
    catalog
        .insert_video(playlist, 1, &VideoRecord::default())
        .unwrap();

    let videos = catalog.videos_for_playlist(playlist, 1).await.unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].name, None);
    assert_eq!(videos[0].url, None);
    assert_eq!(videos[0].path, None);
    assert_eq!(videos[0].duration_secs(), 0);
}
