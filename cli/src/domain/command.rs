//! Rendering of the shell command each targeted host runs.
//!
//! Rendering is pure: the same operation, environment and flags always give
//! byte-identical command lines.

use std::fmt::Write as _;

use crate::domain::env::{EnvVar, ResolvedEnvironment};
use crate::domain::error::{BuildError, ConfigConflict, EnvError};
use crate::domain::operation::Operation;

/// SSH transport handed to rsync for configuration pushes.
pub const RSYNC_SSH: &str = "ssh -o StrictHostKeyChecking=no";

/// Variables forwarded as `VAR=value` prefixes, in emission order.
pub const FORWARDED_ENV: [EnvVar; 4] = [
    EnvVar::GpHome,
    EnvVar::PxfConf,
    EnvVar::PxfBase,
    EnvVar::JavaHome,
];

/// Command-line switches that change how commands render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderFlags {
    /// Pass `--delete` to rsync so removed files disappear on the targets.
    pub delete_on_sync: bool,
    /// Pass `--skip-register` to `pxf init` on every host.
    pub skip_register: bool,
}

/// A validated command ready to be rendered for any host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandPlan {
    /// Push `conf`, `lib` and `servers` under `base` to each target.
    Rsync { base: String, delete: bool },
    /// Run the same `pxf` invocation on every target.
    Pxf { line: String },
}

impl CommandPlan {
    /// The command line for `hostname`.
    #[must_use]
    pub fn render(&self, hostname: &str) -> String {
        match self {
            Self::Rsync { base, delete } => {
                let delete = if *delete { " --delete" } else { "" };
                format!(
                    "rsync -az{delete} -e '{RSYNC_SSH}' '{base}/conf' '{base}/lib' '{base}/servers' '{hostname}:{base}'"
                )
            }
            Self::Pxf { line } => line.clone(),
        }
    }
}

fn require(env: &ResolvedEnvironment, var: EnvVar) -> Result<&str, EnvError> {
    env.get(var).ok_or(EnvError::MissingVar(var))
}

/// Base directory the remote agent will use: `PXF_BASE`, else `PXF_HOME`.
fn effective_base(env: &ResolvedEnvironment) -> Option<&str> {
    env.get(EnvVar::PxfBase).or_else(|| env.get(EnvVar::PxfHome))
}

/// Reject directory combinations that would make `prepare` or `migrate`
/// overwrite their own input.
///
/// # Errors
///
/// Returns [`ConfigConflict`] when the guard for `op` trips.
pub fn check_conflicts(op: Operation, env: &ResolvedEnvironment) -> Result<(), ConfigConflict> {
    let base = effective_base(env);
    let home = env.get(EnvVar::PxfHome);
    let conf = env.get(EnvVar::PxfConf);
    match op {
        Operation::Prepare if home.is_some() && home == base => {
            Err(ConfigConflict::BaseIsInstallDir)
        }
        Operation::Migrate if conf.is_some() && conf == base => {
            Err(ConfigConflict::BaseIsLegacyConf)
        }
        _ => Ok(()),
    }
}

/// Build the command plan for `op`.
///
/// # Errors
///
/// Returns [`BuildError::Conflict`] when a directory guard trips and
/// [`BuildError::Env`] when `env` lacks a variable the command needs.
pub fn build(
    op: Operation,
    env: &ResolvedEnvironment,
    flags: RenderFlags,
) -> Result<CommandPlan, BuildError> {
    check_conflicts(op, env)?;

    if op == Operation::Sync {
        return Ok(CommandPlan::Rsync {
            base: require(env, EnvVar::PxfBase)?.to_string(),
            delete: flags.delete_on_sync,
        });
    }

    let home = require(env, EnvVar::PxfHome)?;
    let mut line = String::new();
    for var in FORWARDED_ENV {
        if let Some(value) = env.get(var) {
            let _ = write!(line, "{var}={value} ");
        }
    }
    let _ = write!(line, "{home}/bin/pxf {op}");
    if op == Operation::Reset {
        // the remote reset prompts on its own; the cluster prompt already ran
        line.push_str(" --force");
    }
    if op == Operation::Init && flags.skip_register {
        line.push_str(" --skip-register");
    }
    Ok(CommandPlan::Pxf { line })
}

/// Render `op`'s command for a single host.
///
/// # Errors
///
/// See [`build`].
pub fn render_command(
    op: Operation,
    env: &ResolvedEnvironment,
    flags: RenderFlags,
    hostname: &str,
) -> Result<String, BuildError> {
    Ok(build(op, env, flags)?.render(hostname))
}
