//! Construction du manifeste SMIL d'un tenant

use crate::document::SmilWriter;
use crate::{escape_xml, PathResolver, Result};
use smilcatalog::{Catalog, PlaylistRecord, Tenant, VideoRecord};
use tracing::{debug, info};

const DEFAULT_SEQUENCE_ID: &str = "playlist_default";
const DEFAULT_SEQUENCE_TITLE: &str = "Playlist Padrão";
const DEFAULT_VIDEO_FILE: &str = "demo.mp4";
const DEFAULT_VIDEO_TITLE: &str = "Vídeo de Demonstração";
const DEFAULT_VIDEO_DURATION_SECS: i64 = 30;

/// Textes fixes de l'en-tête `<head>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestMetadata {
    pub title: String,
    pub copyright: String,
    pub description: String,
}

impl Default for ManifestMetadata {
    fn default() -> Self {
        Self {
            title: "Playlists de Agendamentos".to_string(),
            copyright: "Sistema de Streaming".to_string(),
            description: "Arquivo SMIL gerado automaticamente para agendamentos".to_string(),
        }
    }
}

/// Une playlist et ses vidéos, dans l'ordre du catalogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistContent {
    pub playlist: PlaylistRecord,
    pub videos: Vec<VideoRecord>,
}

/// Manifeste généré pour un tenant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub login: String,
    pub xml: String,
    /// Toutes les playlists lues, vides comprises
    pub playlists_count: usize,
    /// Entrées `<video>` émises, entrée par défaut comprise
    pub entries_count: usize,
}

/// Assemble le document SMIL d'un tenant à partir du catalogue
#[derive(Debug, Clone, Default)]
pub struct ManifestBuilder {
    resolver: PathResolver,
    metadata: ManifestMetadata,
}

impl ManifestBuilder {
    pub fn new(resolver: PathResolver, metadata: ManifestMetadata) -> Self {
        Self { resolver, metadata }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Lit les playlists et vidéos du tenant puis rend le manifeste
    pub async fn build(&self, catalog: &dyn Catalog, tenant: &Tenant) -> Result<Manifest> {
        let playlists = catalog.playlists_for_tenant(tenant.id).await?;
        if playlists.is_empty() {
            info!(login = %tenant.login, "⚠️ Tenant has no playlist, using default content");
        }

        let mut contents = Vec::with_capacity(playlists.len());
        for playlist in playlists {
            let videos = catalog.videos_for_playlist(playlist.id, tenant.id).await?;
            contents.push(PlaylistContent { playlist, videos });
        }

        self.render(&tenant.login, &contents)
    }

    /// Rend le document SMIL (fonction pure : mêmes entrées, mêmes octets)
    pub fn render(&self, login: &str, playlists: &[PlaylistContent]) -> Result<Manifest> {
        let author = escape_xml(login);
        let title = escape_xml(self.metadata.title.as_str());
        let copyright = escape_xml(self.metadata.copyright.as_str());
        let description = escape_xml(self.metadata.description.as_str());

        let mut writer = SmilWriter::new();
        writer.open(&[
            ("title", title.as_str()),
            ("copyright", copyright.as_str()),
            ("author", author.as_str()),
            ("description", description.as_str()),
        ])?;

        let mut entries_count = 0;
        for content in playlists {
            let playlist = &content.playlist;
            if content.videos.is_empty() {
                debug!(playlist_id = playlist.id, "Playlist has no video, skipped");
                continue;
            }

            writer.open_sequence(
                &format!("playlist_{}", playlist.id),
                &escape_xml(playlist.name.as_deref()),
            )?;
            for video in &content.videos {
                let src = self.resolver.resolve(video, login);
                writer.video(
                    &escape_xml(src.as_str()),
                    &format!("{}s", video.duration_secs()),
                    &escape_xml(video.name.as_deref()),
                )?;
                entries_count += 1;
            }
            writer.close_sequence()?;
            debug!(
                playlist_id = playlist.id,
                videos = content.videos.len(),
                "Playlist added to manifest"
            );
        }

        if entries_count == 0 {
            let src = format!("{}/default/{}", login, DEFAULT_VIDEO_FILE);
            writer.open_sequence(DEFAULT_SEQUENCE_ID, &escape_xml(DEFAULT_SEQUENCE_TITLE))?;
            writer.video(
                &escape_xml(src.as_str()),
                &format!("{}s", DEFAULT_VIDEO_DURATION_SECS),
                &escape_xml(DEFAULT_VIDEO_TITLE),
            )?;
            writer.close_sequence()?;
            entries_count = 1;
        }

        Ok(Manifest {
            login: login.to_string(),
            xml: writer.finish()?,
            playlists_count: playlists.len(),
            entries_count,
        })
    }
}
