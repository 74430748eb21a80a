//! Catalogue SQLite

use crate::record::{AccountRecord, PlaylistRecord, ServerId, VideoRecord};
use crate::{Catalog, CatalogError, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS accounts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tenant_id INTEGER NOT NULL,
        email TEXT,
        status INTEGER NOT NULL DEFAULT 1,
        server_id INTEGER
    );
    CREATE TABLE IF NOT EXISTS playlists (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        tenant_id INTEGER NOT NULL,
        name TEXT
    );
    CREATE TABLE IF NOT EXISTS videos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        playlist_id INTEGER NOT NULL,
        tenant_id INTEGER NOT NULL,
        name TEXT,
        url TEXT,
        path TEXT,
        duration INTEGER,
        FOREIGN KEY (playlist_id) REFERENCES playlists(id) ON DELETE CASCADE
    );
    CREATE INDEX IF NOT EXISTS idx_playlists_tenant ON playlists(tenant_id, id);
    CREATE INDEX IF NOT EXISTS idx_videos_playlist ON videos(playlist_id, tenant_id, id);
";

/// Catalogue adossé à une base SQLite (une connexion partagée)
#[derive(Clone)]
pub struct SqliteCatalog {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCatalog {
    /// Ouvre (ou crée) la base et s'assure que le schéma existe
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    CatalogError::Open(format!("Failed to create directory: {}", e))
                })?;
            }
        }

        let conn = Connection::open(db_path)
            .map_err(|e| CatalogError::Open(format!("Failed to open database: {}", e)))?;
        debug!(path = %db_path.display(), "Opened SQLite catalog");
        Self::with_connection(conn)
    }

    /// Base en mémoire, utile pour les tests et les essais
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| CatalogError::Open(format!("Failed to open database: {}", e)))?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .map_err(|e| CatalogError::Open(format!("Failed to create schema: {}", e)))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| CatalogError::LockPoisoned)
    }

    /// Ajoute un compte streaming et renvoie son identifiant
    pub fn insert_account(
        &self,
        tenant_id: i64,
        email: Option<&str>,
        active: bool,
        server_id: Option<ServerId>,
    ) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO accounts (tenant_id, email, status, server_id) VALUES (?1, ?2, ?3, ?4)",
            params![tenant_id, email, active as i64, server_id],
        )
        .map_err(|e| CatalogError::Query(format!("Failed to insert account: {}", e)))?;
        Ok(conn.last_insert_rowid())
    }

    /// Ajoute une playlist et renvoie son identifiant
    pub fn insert_playlist(&self, tenant_id: i64, name: Option<&str>) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO playlists (tenant_id, name) VALUES (?1, ?2)",
            params![tenant_id, name],
        )
        .map_err(|e| CatalogError::Query(format!("Failed to insert playlist: {}", e)))?;
        Ok(conn.last_insert_rowid())
    }

    /// Ajoute une vidéo à une playlist et renvoie son identifiant
    ///
    /// L'identifiant de `video` est ignoré : il est attribué par la base.
    pub fn insert_video(&self, playlist_id: i64, tenant_id: i64, video: &VideoRecord) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO videos (playlist_id, tenant_id, name, url, path, duration)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                playlist_id,
                tenant_id,
                video.name,
                video.url,
                video.path,
                video.duration,
            ],
        )
        .map_err(|e| CatalogError::Query(format!("Failed to insert video: {}", e)))?;
        Ok(conn.last_insert_rowid())
    }
}

#[async_trait]
impl Catalog for SqliteCatalog {
    async fn active_tenants(&self) -> Result<Vec<AccountRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT DISTINCT tenant_id, email, server_id
                 FROM accounts
                 WHERE status = 1 AND email IS NOT NULL
                 ORDER BY tenant_id, email, server_id",
            )
            .map_err(|e| CatalogError::Query(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                Ok(AccountRecord {
                    tenant_id: row.get(0)?,
                    email: row.get(1)?,
                    server_id: row.get(2)?,
                })
            })
            .map_err(|e| CatalogError::Query(format!("Failed to query accounts: {}", e)))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| CatalogError::Query(format!("Failed to read account: {}", e)))
    }

    async fn playlists_for_tenant(&self, tenant_id: i64) -> Result<Vec<PlaylistRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT id, name FROM playlists WHERE tenant_id = ?1 ORDER BY id")
            .map_err(|e| CatalogError::Query(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map(params![tenant_id], |row| {
                Ok(PlaylistRecord {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .map_err(|e| CatalogError::Query(format!("Failed to query playlists: {}", e)))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| CatalogError::Query(format!("Failed to read playlist: {}", e)))
    }

    async fn videos_for_playlist(
        &self,
        playlist_id: i64,
        tenant_id: i64,
    ) -> Result<Vec<VideoRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, name, url, path, CAST(duration AS INTEGER)
                 FROM videos
                 WHERE playlist_id = ?1 AND tenant_id = ?2
                 ORDER BY id",
            )
            .map_err(|e| CatalogError::Query(format!("Failed to prepare statement: {}", e)))?;

        let rows = stmt
            .query_map(params![playlist_id, tenant_id], |row| {
                Ok(VideoRecord {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    url: row.get(2)?,
                    path: row.get(3)?,
                    duration: row.get(4)?,
                })
            })
            .map_err(|e| CatalogError::Query(format!("Failed to query videos: {}", e)))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| CatalogError::Query(format!("Failed to read video: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fractional_duration_is_truncated() {
        let catalog = SqliteCatalog::open_in_memory().unwrap();
        let playlist = catalog.insert_playlist(1, Some("P")).unwrap();
        {
            let conn = catalog.conn().unwrap();
            conn.execute(
                "INSERT INTO videos (playlist_id, tenant_id, name, duration) VALUES (?1, 1, 'a', 12.5)",
                params![playlist],
            )
            .unwrap();
            conn.execute(
                "INSERT INTO videos (playlist_id, tenant_id, name, duration) VALUES (?1, 1, 'b', NULL)",
                params![playlist],
            )
            .unwrap();
        }

        let videos = catalog.videos_for_playlist(playlist, 1).await.unwrap();
        assert_eq!(videos.len(), 2);
        assert_eq!(videos[0].duration, Some(12));
        assert_eq!(videos[1].duration, None);
    }
}
