//! Doublures partagées par les tests d'intégration

#![allow(dead_code)]

use async_trait::async_trait;
use smiltransport::{CommandOutput, FileInfo, ServerId, Transport, TransportError};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Appel reçu par le transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Upload { server: ServerId, remote: String },
    Command { server: ServerId, command: String },
    Delete { server: ServerId, remote: String },
    Stat { server: ServerId, remote: String },
}

/// Transport en mémoire : les fichiers envoyés sont conservés par (serveur, chemin)
#[derive(Default)]
pub struct FakeTransport {
    pub files: Mutex<HashMap<(ServerId, String), String>>,
    pub calls: Mutex<Vec<Call>>,
    /// Chemins des fichiers de transit vus lors des envois
    pub staged: Mutex<Vec<PathBuf>>,
    /// Les envois dont le chemin distant contient l'un de ces motifs échouent
    pub failing_uploads: HashSet<String>,
    /// Les commandes contenant l'un de ces motifs échouent
    pub failing_commands: HashSet<String>,
    pub failing_stat: bool,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_upload_for(mut self, pattern: &str) -> Self {
        self.failing_uploads.insert(pattern.to_string());
        self
    }

    pub fn fail_command_for(mut self, pattern: &str) -> Self {
        self.failing_commands.insert(pattern.to_string());
        self
    }

    pub fn fail_stat(mut self) -> Self {
        self.failing_stat = true;
        self
    }

    pub fn file(&self, server: ServerId, remote: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(&(server, remote.to_string()))
            .cloned()
    }

    pub fn put_file(&self, server: ServerId, remote: &str, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert((server, remote.to_string()), content.to_string());
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn staged(&self) -> Vec<PathBuf> {
        self.staged.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn failed(server: ServerId, what: &str) -> TransportError {
        TransportError::CommandFailed {
            server,
            status: "exit code 1".to_string(),
            stderr: format!("simulated failure: {}", what),
        }
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn upload(
        &self,
        server: ServerId,
        local_path: &Path,
        remote_path: &str,
    ) -> smiltransport::Result<()> {
        self.record(Call::Upload {
            server,
            remote: remote_path.to_string(),
        });
        self.staged.lock().unwrap().push(local_path.to_path_buf());

        if self.failing_uploads.iter().any(|p| remote_path.contains(p)) {
            return Err(TransportError::UploadFailed {
                remote: remote_path.to_string(),
                status: "exit code 1".to_string(),
                stderr: "simulated upload failure".to_string(),
            });
        }

        let content = std::fs::read_to_string(local_path)
            .map_err(|e| TransportError::Other(e.into()))?;
        self.put_file(server, remote_path, &content);
        Ok(())
    }

    async fn execute_command(
        &self,
        server: ServerId,
        command: &str,
    ) -> smiltransport::Result<CommandOutput> {
        self.record(Call::Command {
            server,
            command: command.to_string(),
        });
        if self.failing_commands.iter().any(|p| command.contains(p)) {
            return Err(Self::failed(server, command));
        }
        Ok(CommandOutput::default())
    }

    async fn delete_file(&self, server: ServerId, remote_path: &str) -> smiltransport::Result<()> {
        self.record(Call::Delete {
            server,
            remote: remote_path.to_string(),
        });
        match self
            .files
            .lock()
            .unwrap()
            .remove(&(server, remote_path.to_string()))
        {
            Some(_) => Ok(()),
            None => Err(TransportError::NotFound(remote_path.to_string())),
        }
    }

    async fn file_info(&self, server: ServerId, remote_path: &str) -> smiltransport::Result<FileInfo> {
        self.record(Call::Stat {
            server,
            remote: remote_path.to_string(),
        });
        if self.failing_stat {
            return Err(Self::failed(server, "stat"));
        }
        Ok(match self.file(server, remote_path) {
            Some(content) => FileInfo::present(content.len() as u64),
            None => FileInfo::missing(),
        })
    }
}
