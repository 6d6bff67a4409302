//! Infrastructure implementation of the `CatalogQuery` port via `psql`.

use anyhow::{Result, bail};

use crate::application::ports::{CatalogQuery, CommandRunner};
use crate::domain::cluster::{ROW_SEPARATOR, parse_rows};
use crate::domain::{SegmentConfig, TopologyError};

/// Database the catalog is read from unless told otherwise.
pub const DEFAULT_DATABASE: &str = "postgres";

/// Where the coordinator's catalog listens.
///
/// Unset fields fall through to `psql`'s own defaults (`PGHOST`, `PGPORT`,
/// `PGUSER`, local socket).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub user: Option<String>,
    pub database: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            user: None,
            database: DEFAULT_DATABASE.to_string(),
        }
    }
}

/// Catalog reader that shells out to `psql` in unaligned, tuples-only mode.
pub struct PsqlCatalog<R> {
    runner: R,
    settings: ConnectionSettings,
}

impl<R: CommandRunner> PsqlCatalog<R> {
    #[must_use]
    pub fn new(runner: R, settings: ConnectionSettings) -> Self {
        Self { runner, settings }
    }

    async fn psql(&self, sql: &str) -> Result<String> {
        let port = self.settings.port.map(|p| p.to_string());
        let separator = ROW_SEPARATOR.to_string();
        let mut args = vec![
            "-X",
            "-A",
            "-t",
            "-q",
            "-v",
            "ON_ERROR_STOP=1",
            "-F",
            separator.as_str(),
            "-d",
            self.settings.database.as_str(),
        ];
        if let Some(host) = &self.settings.host {
            args.extend(["-h", host.as_str()]);
        }
        if let Some(port) = &port {
            args.extend(["-p", port.as_str()]);
        }
        if let Some(user) = &self.settings.user {
            args.extend(["-U", user.as_str()]);
        }
        args.extend(["-c", sql]);

        let output = self.runner.run("psql", &args).await?;
        if !output.status.success() {
            bail!("{}", String::from_utf8_lossy(&output.stderr).trim());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl<R: CommandRunner> CatalogQuery for PsqlCatalog<R> {
    async fn ping(&self) -> Result<(), TopologyError> {
        self.psql("SELECT 1")
            .await
            .map(|_| ())
            .map_err(|e| TopologyError::Connection {
                reason: format!("{e:#}"),
            })
    }

    async fn query(&self, sql: &str) -> Result<Vec<SegmentConfig>, TopologyError> {
        let stdout = self
            .psql(sql)
            .await
            .map_err(|e| TopologyError::Query(format!("{e:#}")))?;
        parse_rows(&stdout)
    }
}
