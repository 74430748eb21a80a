//! Orchestration : génération, mise à jour, suppression et régénération globale

use crate::publisher::{PublishSettings, Publisher};
use crate::{Result, ServiceError};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use smilcatalog::{Catalog, ServerId, Tenant};
use smilmanifest::{ManifestBuilder, DEFAULT_MEDIA_ROOT};
use smiltransport::Transport;
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_MANIFEST_FILE_NAME: &str = "playlists_agendamentos.smil";
pub const DEFAULT_SERVER_ID: ServerId = 1;

/// Paramètres de l'orchestrateur
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Racine des répertoires des tenants sur les serveurs
    pub media_root: String,
    /// Nom du manifeste dans le répertoire du tenant
    pub file_name: String,
    /// Serveur utilisé quand le compte n'en désigne aucun
    pub default_server_id: ServerId,
    /// Nombre de tenants traités simultanément (1 = séquentiel)
    pub max_concurrent_tenants: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            media_root: DEFAULT_MEDIA_ROOT.to_string(),
            file_name: DEFAULT_MANIFEST_FILE_NAME.to_string(),
            default_server_id: DEFAULT_SERVER_ID,
            max_concurrent_tenants: 1,
        }
    }
}

/// Manifeste généré et publié pour un tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationReport {
    pub manifest_path: String,
    pub playlists_count: usize,
    pub entries_count: usize,
}

/// Issue du traitement d'un tenant dans une régénération globale
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TenantOutcome {
    pub login: String,
    pub tenant_id: i64,
    pub server_id: ServerId,
    pub result: std::result::Result<GenerationReport, String>,
}

impl TenantOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Bilan d'une régénération globale, dans l'ordre des tenants
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchOutcome {
    pub total: usize,
    pub success_count: usize,
    pub results: Vec<TenantOutcome>,
}

/// Service de génération des manifestes SMIL
///
/// Construit explicitement avec ses collaborateurs, ce qui permet de les
/// remplacer par des doublures dans les tests.
pub struct ManifestService {
    catalog: Arc<dyn Catalog>,
    transport: Arc<dyn Transport>,
    builder: ManifestBuilder,
    publisher: Publisher,
    settings: ServiceSettings,
}

impl ManifestService {
    pub fn new(
        catalog: Arc<dyn Catalog>,
        transport: Arc<dyn Transport>,
        builder: ManifestBuilder,
        publish_settings: PublishSettings,
        settings: ServiceSettings,
    ) -> Self {
        let publisher = Publisher::new(transport.clone(), publish_settings);
        Self {
            catalog,
            transport,
            builder,
            publisher,
            settings,
        }
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    /// Chemin distant du manifeste d'un tenant
    pub fn manifest_path(&self, login: &str) -> String {
        format!(
            "{}/{}/{}",
            self.settings.media_root.trim_end_matches('/'),
            login,
            self.settings.file_name
        )
    }

    /// Génère et publie le manifeste d'un tenant
    pub async fn generate(&self, tenant: &Tenant) -> Result<GenerationReport> {
        info!(login = %tenant.login, "📄 Generating SMIL manifest");

        let manifest = self.builder.build(self.catalog.as_ref(), tenant).await?;
        let manifest_path = self.manifest_path(&tenant.login);
        self.publisher
            .publish(tenant.server_id, &tenant.login, &manifest.xml, &manifest_path)
            .await?;

        info!(
            login = %tenant.login,
            playlists = manifest.playlists_count,
            entries = manifest.entries_count,
            "✅ SMIL manifest generated"
        );
        Ok(GenerationReport {
            manifest_path,
            playlists_count: manifest.playlists_count,
            entries_count: manifest.entries_count,
        })
    }

    /// Régénère entièrement le manifeste d'un tenant
    pub async fn update(&self, tenant: &Tenant) -> Result<GenerationReport> {
        info!(login = %tenant.login, "🔄 Updating SMIL manifest");
        self.generate(tenant).await
    }

    /// Supprime le manifeste distant ; un fichier absent est un échec
    pub async fn remove(&self, server: ServerId, login: &str) -> Result<()> {
        let path = self.manifest_path(login);
        self.transport
            .delete_file(server, &path)
            .await
            .map_err(|source| ServiceError::Remove {
                path: path.clone(),
                source,
            })?;
        info!(server, path = %path, "🗑️ SMIL manifest removed");
        Ok(())
    }

    /// Indique si le manifeste existe ; une erreur de transport vaut « absent »
    pub async fn exists(&self, server: ServerId, login: &str) -> bool {
        let path = self.manifest_path(login);
        match self.transport.file_info(server, &path).await {
            Ok(info) => info.exists,
            Err(e) => {
                warn!(server, path = %path, error = %e, "Failed to check SMIL manifest");
                false
            }
        }
    }

    /// Régénère les manifestes de tous les tenants actifs
    ///
    /// L'échec d'un tenant est consigné dans son résultat et n'interrompt pas
    /// les suivants. Seule l'impossibilité de lister les tenants fait échouer
    /// l'ensemble.
    pub async fn regenerate_all(&self) -> Result<BatchOutcome> {
        info!("🔄 Generating SMIL manifests for all tenants...");

        let tenants: Vec<Tenant> = self
            .catalog
            .active_tenants()
            .await?
            .iter()
            .map(|account| Tenant::from_account(account, self.settings.default_server_id))
            .collect();

        // `buffered` rend les résultats dans l'ordre des tenants
        let results: Vec<TenantOutcome> = stream::iter(tenants)
            .map(|tenant| self.process(tenant))
            .buffered(self.settings.max_concurrent_tenants.max(1))
            .collect()
            .await;

        let success_count = results.iter().filter(|r| r.is_success()).count();
        info!(
            "✅ SMIL manifests generated: {}/{} tenants",
            success_count,
            results.len()
        );

        Ok(BatchOutcome {
            total: results.len(),
            success_count,
            results,
        })
    }

    async fn process(&self, tenant: Tenant) -> TenantOutcome {
        let result = self.generate(&tenant).await.map_err(|e| {
            warn!(login = %tenant.login, tenant_id = tenant.id, error = %e, "❌ SMIL generation failed");
            e.to_string()
        });

        TenantOutcome {
            login: tenant.login,
            tenant_id: tenant.id,
            server_id: tenant.server_id,
            result,
        }
    }
}
