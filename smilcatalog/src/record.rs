//! Enregistrements du catalogue et dérivation des tenants

use serde::{Deserialize, Serialize};

/// Identifiant d'un serveur média
pub type ServerId = i64;

/// Compte actif tel que renvoyé par le catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub tenant_id: i64,
    pub email: String,
    pub server_id: Option<ServerId>,
}

/// Playlist d'un tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistRecord {
    pub id: i64,
    pub name: Option<String>,
}

/// Vidéo appartenant à une playlist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: i64,
    pub name: Option<String>,
    pub url: Option<String>,
    pub path: Option<String>,
    /// Durée en secondes entières (une valeur fractionnaire stockée est tronquée)
    pub duration: Option<i64>,
}

impl VideoRecord {
    /// Durée en secondes, 0 si inconnue
    pub fn duration_secs(&self) -> i64 {
        self.duration.unwrap_or(0)
    }
}

/// Tenant prêt à être traité : login dérivé et serveur résolu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: i64,
    pub login: String,
    pub server_id: ServerId,
}

impl Tenant {
    pub fn new(id: i64, login: impl Into<String>, server_id: ServerId) -> Self {
        Self {
            id,
            login: login.into(),
            server_id,
        }
    }

    /// Builds a tenant from an account, deriving the login from the e-mail
    /// local part and falling back to `default_server` when no server is set.
    pub fn from_account(account: &AccountRecord, default_server: ServerId) -> Self {
        Self {
            id: account.tenant_id,
            login: login_from_email(&account.email).to_string(),
            server_id: account.server_id.unwrap_or(default_server),
        }
    }
}

/// Partie locale d'une adresse e-mail (avant le premier `@`)
pub fn login_from_email(email: &str) -> &str {
    email.split('@').next().unwrap_or_default()
}
