//! # smiltransport - Transfert de fichiers vers les serveurs média
//!
//! Cette crate définit le contrat minimal dont la publication des manifestes a
//! besoin vis-à-vis d'un serveur distant :
//! - envoi d'un fichier local ([`Transport::upload`])
//! - exécution d'une commande ([`Transport::execute_command`])
//! - suppression d'un fichier ([`Transport::delete_file`])
//! - consultation de l'état d'un fichier ([`Transport::file_info`])
//!
//! [`SshTransport`] implémente ce contrat avec les clients `ssh` et `scp` du
//! système. Les tests fournissent leurs propres doublures.

mod error;
mod ssh;

#[cfg(feature = "smilconfig")]
mod config_ext;

use async_trait::async_trait;
use std::path::Path;

pub use error::{Result, TransportError};
pub use ssh::{SshEndpoint, SshTransport};

#[cfg(feature = "smilconfig")]
pub use config_ext::TransportConfigExt;

/// Identifiant d'un serveur média
pub type ServerId = i64;

/// État d'un fichier distant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileInfo {
    pub exists: bool,
    pub size: Option<u64>,
}

impl FileInfo {
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn present(size: u64) -> Self {
        Self {
            exists: true,
            size: Some(size),
        }
    }
}

/// Sortie d'une commande distante réussie
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Contrat de transport vers un serveur média
#[async_trait]
pub trait Transport: Send + Sync {
    /// Copie `local_path` vers `remote_path` sur le serveur
    async fn upload(&self, server: ServerId, local_path: &Path, remote_path: &str) -> Result<()>;

    /// Exécute une commande shell sur le serveur
    ///
    /// Un code de sortie non nul est une erreur.
    async fn execute_command(&self, server: ServerId, command: &str) -> Result<CommandOutput>;

    /// Supprime un fichier distant ; un fichier absent est une erreur
    async fn delete_file(&self, server: ServerId, remote_path: &str) -> Result<()>;

    /// Indique si un fichier distant existe
    async fn file_info(&self, server: ServerId, remote_path: &str) -> Result<FileInfo>;
}

/// Quotes a value for a POSIX shell (single quotes, embedded quotes escaped)
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_quote_plain() {
        assert_eq!(
            shell_quote("/home/streaming/alice/playlists_agendamentos.smil"),
            "'/home/streaming/alice/playlists_agendamentos.smil'"
        );
    }

    #[test]
    fn test_shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("o'neil"), r"'o'\''neil'");
    }

    #[test]
    fn test_shell_quote_keeps_metacharacters_inert() {
        assert_eq!(shell_quote("a b; rm -rf $HOME"), "'a b; rm -rf $HOME'");
    }
}
