//! Publication d'un manifeste sur un serveur média
//!
//! Le manifeste est d'abord écrit dans un fichier de transit local, envoyé sur
//! le serveur, puis ses droits et son propriétaire sont fixés. Le fichier de
//! transit est supprimé quelle que soit l'issue, y compris si la publication
//! est abandonnée en cours de route.

use crate::{Result, ServiceError};
use chrono::Utc;
use smiltransport::{shell_quote, ServerId, Transport};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

const STAGING_PREFIX: &str = "playlists_agendamentos";
const STAGING_SUFFIX: &str = ".smil";

/// Paramètres de publication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishSettings {
    /// Répertoire des fichiers de transit, répertoire temporaire du système si `None`
    pub staging_dir: Option<PathBuf>,
    /// Mode passé à `chmod`
    pub file_mode: String,
    /// Propriétaire passé à `chown`
    pub owner: String,
}

impl Default for PublishSettings {
    fn default() -> Self {
        Self {
            staging_dir: None,
            file_mode: "644".to_string(),
            owner: "streaming:streaming".to_string(),
        }
    }
}

/// Résultat d'une publication réussie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub remote_path: String,
    pub bytes: usize,
}

/// Écrit, transfère et sécurise les manifestes
pub struct Publisher {
    transport: Arc<dyn Transport>,
    settings: PublishSettings,
}

impl Publisher {
    pub fn new(transport: Arc<dyn Transport>, settings: PublishSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    pub fn settings(&self) -> &PublishSettings {
        &self.settings
    }

    /// Publie `manifest` à `destination` sur `server`
    pub async fn publish(
        &self,
        server: ServerId,
        login: &str,
        manifest: &str,
        destination: &str,
    ) -> Result<PublishReport> {
        let staging = self.stage(login, manifest)?;
        debug!(staging = %staging.path().display(), destination, "Manifest staged");

        let outcome = self.transfer(server, staging.path(), destination).await;

        let staging_path = staging.path().to_path_buf();
        if let Err(e) = staging.close() {
            warn!(staging = %staging_path.display(), error = %e, "Failed to remove staging file");
        }

        outcome?;
        info!(server, destination, "📤 Manifest published");
        Ok(PublishReport {
            remote_path: destination.to_string(),
            bytes: manifest.len(),
        })
    }

    fn stage(&self, login: &str, manifest: &str) -> Result<NamedTempFile> {
        let prefix = format!(
            "{}_{}_{}_",
            STAGING_PREFIX,
            sanitize_file_component(login),
            Utc::now().timestamp_millis()
        );

        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix).suffix(STAGING_SUFFIX);
        let mut file = match &self.settings.staging_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(ServiceError::Staging)?;

        file.write_all(manifest.as_bytes())
            .map_err(ServiceError::Staging)?;
        file.flush().map_err(ServiceError::Staging)?;
        Ok(file)
    }

    async fn transfer(&self, server: ServerId, staging: &Path, destination: &str) -> Result<()> {
        self.transport
            .upload(server, staging, destination)
            .await
            .map_err(|source| ServiceError::Upload {
                path: destination.to_string(),
                source,
            })?;

        let quoted = shell_quote(destination);

        let chmod = format!("chmod {} {}", self.settings.file_mode, quoted);
        self.transport
            .execute_command(server, &chmod)
            .await
            .map_err(|source| ServiceError::Permissions {
                path: destination.to_string(),
                source,
            })?;

        let chown = format!("chown {} {}", self.settings.owner, quoted);
        self.transport
            .execute_command(server, &chown)
            .await
            .map_err(|source| ServiceError::Ownership {
                path: destination.to_string(),
                source,
            })?;

        Ok(())
    }
}

/// Keeps a login usable inside a local file name
fn sanitize_file_component(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
