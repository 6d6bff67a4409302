//! Infrastructure implementation of the `LocalHost` port.

use anyhow::{Result, bail};

use crate::application::ports::{CommandRunner, LocalHost};

/// Reads the hostname by running `hostname`, the same name the cluster
/// catalog records for each segment.
pub struct SystemHost<R> {
    runner: R,
}

impl<R: CommandRunner> SystemHost<R> {
    #[must_use]
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

impl<R: CommandRunner> LocalHost for SystemHost<R> {
    async fn hostname(&self) -> Result<String> {
        let output = self.runner.run("hostname", &[]).await?;
        if !output.status.success() {
            bail!(
                "hostname exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if name.is_empty() {
            bail!("hostname printed nothing");
        }
        Ok(name)
    }
}
