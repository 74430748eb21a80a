//! Extension de smilconfig pour le transport SSH

use crate::{ServerId, SshEndpoint, SshTransport};
use anyhow::{anyhow, Context, Result};
use serde_yaml::Value;
use std::collections::HashMap;

/// Trait d'extension pour smilconfig::Config
pub trait TransportConfigExt {
    /// Adresses SSH déclarées sous `servers`, indexées par identifiant
    fn ssh_endpoints(&self) -> Result<HashMap<ServerId, SshEndpoint>>;

    /// Transport SSH configuré avec tous les serveurs connus
    fn ssh_transport(&self) -> Result<SshTransport> {
        Ok(SshTransport::new(self.ssh_endpoints()?))
    }
}

impl TransportConfigExt for smilconfig::Config {
    fn ssh_endpoints(&self) -> Result<HashMap<ServerId, SshEndpoint>> {
        let servers = match self.get_value(&["servers"]) {
            Ok(Value::Mapping(map)) => map,
            Ok(Value::Null) | Err(_) => return Ok(HashMap::new()),
            Ok(_) => return Err(anyhow!("`servers` must be a mapping")),
        };

        let mut endpoints = HashMap::with_capacity(servers.len());
        for (key, value) in servers {
            let id: ServerId = match &key {
                Value::String(s) => s
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid server id `{}`", s))?,
                Value::Number(n) => n
                    .as_i64()
                    .ok_or_else(|| anyhow!("Invalid server id `{}`", n))?,
                other => return Err(anyhow!("Invalid server id {:?}", other)),
            };
            let endpoint: SshEndpoint = serde_yaml::from_value(value)
                .with_context(|| format!("Invalid settings for server {}", id))?;
            endpoints.insert(id, endpoint);
        }
        Ok(endpoints)
    }
}
