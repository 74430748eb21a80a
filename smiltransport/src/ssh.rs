//! Transport via les clients OpenSSH du système

use crate::{shell_quote, CommandOutput, FileInfo, Result, ServerId, Transport, TransportError};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;
use tracing::debug;

const DEFAULT_SSH_PORT: u16 = 22;
const MISSING_MARKER: &str = "missing";

fn default_port() -> u16 {
    DEFAULT_SSH_PORT
}

fn default_user() -> String {
    "root".to_string()
}

/// Adresse SSH d'un serveur média
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SshEndpoint {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_user")]
    pub user: String,
    #[serde(default)]
    pub identity_file: Option<PathBuf>,
}

impl SshEndpoint {
    pub fn new(host: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_SSH_PORT,
            user: user.into(),
            identity_file: None,
        }
    }

    fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    fn common_args(&self, port_flag: &str) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            port_flag.to_string(),
            self.port.to_string(),
        ];
        if let Some(identity) = &self.identity_file {
            args.push("-i".to_string());
            args.push(identity.to_string_lossy().to_string());
        }
        args
    }

    /// Arguments de `ssh` pour exécuter `command`
    pub fn ssh_args(&self, command: &str) -> Vec<String> {
        let mut args = self.common_args("-p");
        args.push(self.destination());
        args.push(command.to_string());
        args
    }

    /// Arguments de `scp` pour copier `local_path` vers `remote_path`
    ///
    /// `-s` force le protocole SFTP : le chemin distant n'est pas interprété
    /// par un shell et n'a donc pas à être quoté (OpenSSH 8.7 ou plus récent).
    pub fn scp_args(&self, local_path: &Path, remote_path: &str) -> Vec<String> {
        let mut args = vec!["-s".to_string()];
        args.extend(self.common_args("-P"));
        args.push(local_path.to_string_lossy().to_string());
        args.push(format!("{}:{}", self.destination(), remote_path));
        args
    }
}

/// Transport qui délègue à `ssh` et `scp`
///
/// Chaque appel bloque jusqu'à la fin du processus, sans délai d'expiration.
#[derive(Debug, Clone)]
pub struct SshTransport {
    endpoints: HashMap<ServerId, SshEndpoint>,
    ssh_program: String,
    scp_program: String,
}

impl SshTransport {
    pub fn new(endpoints: HashMap<ServerId, SshEndpoint>) -> Self {
        Self {
            endpoints,
            ssh_program: "ssh".to_string(),
            scp_program: "scp".to_string(),
        }
    }

    /// Remplace les exécutables utilisés (wrappers, chemins absolus)
    pub fn with_programs(mut self, ssh: impl Into<String>, scp: impl Into<String>) -> Self {
        self.ssh_program = ssh.into();
        self.scp_program = scp.into();
        self
    }

    pub fn endpoint(&self, server: ServerId) -> Result<&SshEndpoint> {
        self.endpoints
            .get(&server)
            .ok_or(TransportError::UnknownServer(server))
    }

    async fn run(&self, program: &str, args: &[String]) -> Result<Output> {
        Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| TransportError::Spawn {
                program: program.to_string(),
                source,
            })
    }
}

fn status_text(output: &Output) -> String {
    match output.status.code() {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

#[async_trait]
impl Transport for SshTransport {
    async fn upload(&self, server: ServerId, local_path: &Path, remote_path: &str) -> Result<()> {
        let endpoint = self.endpoint(server)?;
        debug!(server, local = %local_path.display(), remote = remote_path, "scp upload");

        let output = self
            .run(&self.scp_program, &endpoint.scp_args(local_path, remote_path))
            .await?;
        if !output.status.success() {
            return Err(TransportError::UploadFailed {
                remote: remote_path.to_string(),
                status: status_text(&output),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }

    async fn execute_command(&self, server: ServerId, command: &str) -> Result<CommandOutput> {
        let endpoint = self.endpoint(server)?;
        debug!(server, command, "ssh exec");

        let output = self.run(&self.ssh_program, &endpoint.ssh_args(command)).await?;
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        if !output.status.success() {
            return Err(TransportError::CommandFailed {
                server,
                status: status_text(&output),
                stderr,
            });
        }
        Ok(CommandOutput { stdout, stderr })
    }

    async fn delete_file(&self, server: ServerId, remote_path: &str) -> Result<()> {
        let command = format!("rm -- {}", shell_quote(remote_path));
        match self.execute_command(server, &command).await {
            Ok(_) => Ok(()),
            Err(TransportError::CommandFailed { stderr, .. })
                if stderr.contains("No such file") =>
            {
                Err(TransportError::NotFound(remote_path.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    async fn file_info(&self, server: ServerId, remote_path: &str) -> Result<FileInfo> {
        let quoted = shell_quote(remote_path);
        let command = format!(
            "if [ -e {0} ]; then wc -c < {0}; else echo {1}; fi",
            quoted, MISSING_MARKER
        );
        let output = self.execute_command(server, &command).await?;
        parse_file_info(&output.stdout)
    }
}

fn parse_file_info(stdout: &str) -> Result<FileInfo> {
    let answer = stdout.trim();
    if answer == MISSING_MARKER {
        return Ok(FileInfo::missing());
    }
    answer
        .parse::<u64>()
        .map(FileInfo::present)
        .map_err(|_| TransportError::UnexpectedOutput(answer.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> SshEndpoint {
        SshEndpoint {
            host: "media1.example.net".into(),
            port: 2222,
            user: "deploy".into(),
            identity_file: Some(PathBuf::from("/etc/smilcast/id_ed25519")),
        }
    }

    #[test]
    fn test_ssh_args() {
        let args = endpoint().ssh_args("chmod 644 '/x'");
        assert_eq!(
            args,
            vec![
                "-o",
                "BatchMode=yes",
                "-p",
                "2222",
                "-i",
                "/etc/smilcast/id_ed25519",
                "deploy@media1.example.net",
                "chmod 644 '/x'",
            ]
        );
    }

    #[test]
    fn test_scp_args_use_uppercase_port_flag() {
        let args = SshEndpoint::new("media2", "root").scp_args(Path::new("/tmp/a.smil"), "/b.smil");
        assert_eq!(
            args,
            vec!["-s", "-o", "BatchMode=yes", "-P", "22", "/tmp/a.smil", "root@media2:/b.smil"]
        );
    }

    #[test]
    fn test_endpoint_deserialize_defaults() {
        let value: SshEndpoint = serde_yaml::from_str("host: media3").unwrap();
        assert_eq!(value, SshEndpoint::new("media3", "root"));

        let value: SshEndpoint =
            serde_yaml::from_str("host: media4\nport: 2200\nuser: streaming").unwrap();
        assert_eq!(value.port, 2200);
        assert_eq!(value.user, "streaming");
    }

    #[test]
    fn test_parse_file_info() {
        assert_eq!(parse_file_info("missing\n").unwrap(), FileInfo::missing());
        assert_eq!(parse_file_info("1024\n").unwrap(), FileInfo::present(1024));
        assert!(matches!(
            parse_file_info("permission denied"),
            Err(TransportError::UnexpectedOutput(_))
        ));
    }

    #[tokio::test]
    async fn test_unknown_server() {
        let transport = SshTransport::new(HashMap::new());
        let err = transport.execute_command(9, "true").await.unwrap_err();
        assert!(matches!(err, TransportError::UnknownServer(9)));
    }

    #[tokio::test]
    async fn test_failing_command_is_an_error() {
        let mut endpoints = HashMap::new();
        endpoints.insert(1, SshEndpoint::new("localhost", "root"));
        // `false` ignore ses arguments et sort avec le code 1
        let transport = SshTransport::new(endpoints).with_programs("false", "true");

        let err = transport.execute_command(1, "ls").await.unwrap_err();
        assert!(matches!(err, TransportError::CommandFailed { server: 1, .. }));

        let uploaded = transport.upload(1, Path::new("/tmp/x"), "/y").await;
        assert!(uploaded.is_ok());
    }

    /// `ssh` de substitution qui exécute localement son dernier argument
    #[cfg(unix)]
    fn local_shell_transport(dir: &Path) -> SshTransport {
        use std::os::unix::fs::PermissionsExt;

        let wrapper = dir.join("fake-ssh");
        std::fs::write(&wrapper, "#!/bin/sh\nfor last; do :; done\nexec sh -c \"$last\"\n").unwrap();
        std::fs::set_permissions(&wrapper, std::fs::Permissions::from_mode(0o755)).unwrap();

        let mut endpoints = HashMap::new();
        endpoints.insert(1, SshEndpoint::new("localhost", "root"));
        SshTransport::new(endpoints).with_programs(wrapper.to_string_lossy(), "true")
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_delete_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let transport = local_shell_transport(dir.path());
        let absent = dir.path().join("absent.smil");

        let err = transport
            .delete_file(1, &absent.to_string_lossy())
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::NotFound(path) if path.ends_with("absent.smil")));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_info_and_delete_through_shell() {
        let dir = tempfile::tempdir().unwrap();
        let transport = local_shell_transport(dir.path());
        let manifest = dir.path().join("it's here.smil");
        std::fs::write(&manifest, "abc").unwrap();
        let remote = manifest.to_string_lossy().to_string();

        assert_eq!(transport.file_info(1, &remote).await.unwrap(), FileInfo::present(3));

        transport.delete_file(1, &remote).await.unwrap();
        assert!(!manifest.exists());
        assert_eq!(transport.file_info(1, &remote).await.unwrap(), FileInfo::missing());
    }
}
