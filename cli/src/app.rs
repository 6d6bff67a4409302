//! Application context: unified state passed to every command handler.
//!
//! Built once from the top-level flags in `Cli::run()`. Adding a new
//! cross-cutting concern requires only one field change here.

use std::time::Duration;

use crate::infra::catalog::ConnectionSettings;
use crate::infra::command_runner::TokioCommandRunner;
use crate::output::OutputContext;

/// Output rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable terminal output (default).
    Human,
    /// Machine-readable JSON output.
    Json,
}

/// Output rendering flags.
pub struct OutputFlags {
    /// Disable ANSI color output.
    pub no_color: bool,
    /// Suppress non-error output.
    pub quiet: bool,
    /// Enable JSON output mode.
    pub json: bool,
}

/// Flags passed from the top-level CLI to `AppContext::new`.
pub struct AppFlags {
    /// Output rendering options.
    pub output: OutputFlags,
    /// Where the catalog is read from.
    pub connection: ConnectionSettings,
    /// Upper bound on one host's command during a fan-out.
    pub remote_timeout: Duration,
}

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Output rendering mode (human vs JSON).
    pub mode: OutputMode,
    /// Catalog connection parameters for `psql`.
    pub connection: ConnectionSettings,
    /// Per-host timeout for remote commands.
    pub remote_timeout: Duration,
    /// Process runner shared by every infrastructure adapter.
    pub runner: TokioCommandRunner,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// JSON mode silences the human-readable lines on stdout so the JSON
    /// document is the only thing written there.
    #[must_use]
    pub fn new(flags: AppFlags) -> Self {
        let mode = if flags.output.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        };
        let quiet = flags.output.quiet || mode == OutputMode::Json;

        Self {
            output: OutputContext::new(flags.output.no_color, quiet),
            mode,
            connection: flags.connection,
            remote_timeout: flags.remote_timeout,
            runner: TokioCommandRunner::default(),
        }
    }

    /// Returns `true` when JSON output mode is active.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }
}
