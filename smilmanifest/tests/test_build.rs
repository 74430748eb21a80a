use async_trait::async_trait;
use smilcatalog::{
    AccountRecord, Catalog, CatalogError, PlaylistRecord, SqliteCatalog, Tenant, VideoRecord,
};
use smilmanifest::{ManifestBuilder, ManifestError};

fn video(name: &str, url: Option<&str>, path: Option<&str>, duration: Option<i64>) -> VideoRecord {
    VideoRecord {
        name: Some(name.to_string()),
        url: url.map(str::to_string),
        path: path.map(str::to_string),
        duration,
        ..Default::default()
    }
}

/// Catalogue avec deux tenants partageant une playlist mal rattachée
fn seeded_catalog() -> SqliteCatalog {
    let catalog = SqliteCatalog::open_in_memory().unwrap();

    let news = catalog.insert_playlist(1, Some("News & Weather")).unwrap();
    catalog
        .insert_video(news, 1, &video("Headlines", None, Some("/home/streaming/alice/news/h.mp4"), Some(120)))
        .unwrap();
    catalog
        .insert_video(news, 1, &video("Forecast", Some("streaming/alice/f.mp4"), None, None))
        .unwrap();
    // Vidéo d'un autre tenant dans la même playlist
    catalog
        .insert_video(news, 2, &video("Intruder", Some("bob/x.mp4"), None, Some(1)))
        .unwrap();

    catalog.insert_playlist(1, Some("Empty")).unwrap();

    let music = catalog.insert_playlist(1, Some("Music")).unwrap();
    catalog
        .insert_video(music, 1, &video("Track", None, None, Some(200)))
        .unwrap();

    catalog
}

#[tokio::test]
async fn test_build_from_catalog() {
    let catalog = seeded_catalog();
    let tenant = Tenant::new(1, "alice", 1);

    let manifest = ManifestBuilder::default().build(&catalog, &tenant).await.unwrap();

    assert_eq!(manifest.login, "alice");
    assert_eq!(manifest.playlists_count, 3);
    assert_eq!(manifest.entries_count, 3);
    assert!(manifest.xml.contains(r#"title="News &amp; Weather""#));
    assert!(manifest.xml.contains(r#"src="alice/news/h.mp4" dur="120s" title="Headlines""#));
    assert!(manifest.xml.contains(r#"src="alice/f.mp4" dur="0s" title="Forecast""#));
    assert!(manifest.xml.contains(r#"src="alice/default/Track" dur="200s""#));
    assert!(!manifest.xml.contains("Intruder"));
}

#[tokio::test]
async fn test_build_tenant_without_playlists() {
    let catalog = seeded_catalog();
    let tenant = Tenant::new(42, "nobody", 1);

    let manifest = ManifestBuilder::default().build(&catalog, &tenant).await.unwrap();

    assert_eq!(manifest.playlists_count, 0);
    assert_eq!(manifest.entries_count, 1);
    assert!(manifest.xml.contains("nobody/default/demo.mp4"));
}

#[tokio::test]
async fn test_build_twice_is_byte_identical() {
    let catalog = seeded_catalog();
    let tenant = Tenant::new(1, "alice", 1);
    let builder = ManifestBuilder::default();

    let first = builder.build(&catalog, &tenant).await.unwrap();
    let second = builder.build(&catalog, &tenant).await.unwrap();
    assert_eq!(first, second);
}

struct BrokenCatalog;

#[async_trait]
impl Catalog for BrokenCatalog {
    async fn active_tenants(&self) -> smilcatalog::Result<Vec<AccountRecord>> {
        Ok(vec![])
    }

    async fn playlists_for_tenant(&self, _tenant_id: i64) -> smilcatalog::Result<Vec<PlaylistRecord>> {
        Err(CatalogError::Query("connection reset".into()))
    }

    async fn videos_for_playlist(
        &self,
        _playlist_id: i64,
        _tenant_id: i64,
    ) -> smilcatalog::Result<Vec<VideoRecord>> {
        Ok(vec![])
    }
}

#[tokio::test]
async fn test_catalog_errors_are_reported() {
    let tenant = Tenant::new(1, "alice", 1);
    let err = ManifestBuilder::default()
        .build(&BrokenCatalog, &tenant)
        .await
        .unwrap_err();
    assert!(matches!(err, ManifestError::Catalog(_)));
}
