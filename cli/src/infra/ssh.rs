//! Infrastructure implementation of the `FanOutExecutor` port over `ssh`.
//!
//! Every target runs concurrently. Remote-scope commands go through
//! `ssh <host> <cmd>`; local-scope commands (rsync pushes) run on this host
//! through `bash -c`.

use std::time::Duration;

use futures_util::future::join_all;

use crate::application::ports::{CommandRunner, FanOutExecutor};
use crate::domain::{CommandPlan, HostOutput, RemoteOutput, Scope};

/// Options passed to every `ssh` invocation.
pub const SSH_OPTIONS: [&str; 2] = ["-o", "StrictHostKeyChecking=no"];

/// Fan-out executor that spawns one `ssh` (or `bash`) process per host.
pub struct SshFanOut<R> {
    runner: R,
    timeout: Duration,
}

impl<R: CommandRunner> SshFanOut<R> {
    #[must_use]
    pub fn new(runner: R, timeout: Duration) -> Self {
        Self { runner, timeout }
    }

    async fn run_one(&self, host: &str, command: String, run_locally: bool) -> HostOutput {
        let result = if run_locally {
            self.runner
                .run_with_timeout("bash", &["-c", &command], self.timeout)
                .await
        } else {
            let mut args: Vec<&str> = SSH_OPTIONS.to_vec();
            args.extend([host, command.as_str()]);
            self.runner
                .run_with_timeout("ssh", &args, self.timeout)
                .await
        };

        match result {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let stderr = String::from_utf8_lossy(&output.stderr);
                if output.status.success() {
                    HostOutput {
                        host: host.to_string(),
                        stdout: stdout.into_owned(),
                        stderr: stderr.into_owned(),
                        error: None,
                    }
                } else {
                    tracing::debug!(host, status = %output.status, "host command failed");
                    HostOutput::failed(host, &stdout, &stderr, &output.status.to_string())
                }
            }
            Err(e) => {
                tracing::debug!(host, error = %e, "host command did not run");
                HostOutput::failed(host, "", "", &format!("{e:#}"))
            }
        }
    }
}

impl<R: CommandRunner> FanOutExecutor for SshFanOut<R> {
    async fn execute(
        &self,
        targets: &[String],
        scope: Scope,
        plan: &CommandPlan,
    ) -> RemoteOutput {
        let runs = targets
            .iter()
            .map(|host| self.run_one(host, plan.render(host), scope.run_locally));
        RemoteOutput {
            hosts: join_all(runs).await,
        }
    }
}
