mod logs;

use anyhow::{Context, Result, bail};
use smilcatalog::{CatalogConfigExt, SqliteCatalog};
use smilconfig::get_config;
use smilservice::{ManifestService, ServiceConfigExt};
use smiltransport::{ServerId, TransportConfigExt};
use std::sync::Arc;
use tracing::info;

const USAGE: &str = "usage: smilcast [all | remove <server> <login> | exists <server> <login>]";

/// Commande demandée sur la ligne de commande
#[derive(Debug, PartialEq, Eq)]
enum Command {
    All,
    Remove { server: ServerId, login: String },
    Exists { server: ServerId, login: String },
}

fn parse_args(args: &[String]) -> Result<Command> {
    match args {
        [] => Ok(Command::All),
        [cmd] if cmd == "all" => Ok(Command::All),
        [cmd, server, login] if cmd == "remove" || cmd == "exists" => {
            let server: ServerId = server
                .parse()
                .with_context(|| format!("Invalid server id `{}`", server))?;
            let login = login.clone();
            Ok(if cmd == "remove" {
                Command::Remove { server, login }
            } else {
                Command::Exists { server, login }
            })
        }
        _ => bail!("{}", USAGE),
    }
}

async fn run(service: &ManifestService, command: Command) -> Result<serde_json::Value> {
    match command {
        Command::All => {
            let outcome = service.regenerate_all().await?;
            Ok(serde_json::to_value(&outcome)?)
        }
        Command::Remove { server, login } => {
            service.remove(server, &login).await?;
            Ok(serde_json::json!({
                "removed": service.manifest_path(&login),
                "server": server,
            }))
        }
        Command::Exists { server, login } => {
            let exists = service.exists(server, &login).await;
            Ok(serde_json::json!({
                "path": service.manifest_path(&login),
                "server": server,
                "exists": exists,
            }))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = parse_args(&args)?;

    let config = get_config()?;
    logs::init_logging(&config);
    info!(config_dir = config.dir(), "⚙️ Configuration loaded");

    let catalog_path = config.catalog_db_path()?;
    let catalog = SqliteCatalog::open(&catalog_path)
        .with_context(|| format!("Failed to open catalog {}", catalog_path.display()))?;
    info!(path = %catalog_path.display(), "📚 Catalog opened");

    let transport = config.ssh_transport()?;
    let service = config.manifest_service(Arc::new(catalog), Arc::new(transport));

    let report = run(&service, command).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        assert_eq!(parse_args(&args(&[])).unwrap(), Command::All);
        assert_eq!(parse_args(&args(&["all"])).unwrap(), Command::All);
        assert_eq!(
            parse_args(&args(&["remove", "2", "alice"])).unwrap(),
            Command::Remove {
                server: 2,
                login: "alice".into()
            }
        );
        assert_eq!(
            parse_args(&args(&["exists", "1", "bob"])).unwrap(),
            Command::Exists {
                server: 1,
                login: "bob".into()
            }
        );
    }

    #[test]
    fn test_parse_args_rejects_invalid_input() {
        assert!(parse_args(&args(&["remove", "x", "alice"])).is_err());
        assert!(parse_args(&args(&["remove", "1"])).is_err());
        assert!(parse_args(&args(&["purge"])).is_err());
    }
}
