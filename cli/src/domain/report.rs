//! Per-host fan-out results and their aggregation into a report.

use std::fmt;

use serde::Serialize;

use crate::domain::operation::Operation;

/// Appended to host output that was cut short.
pub const TRUNCATION_MARKER: &str = "...";

/// What one host produced during the fan-out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostOutput {
    pub host: String,
    pub stdout: String,
    pub stderr: String,
    /// `None` when the command exited successfully.
    pub error: Option<String>,
}

impl HostOutput {
    /// A successful result.
    #[must_use]
    pub fn ok(host: &str, stdout: &str) -> Self {
        Self {
            host: host.to_string(),
            stdout: stdout.to_string(),
            ..Self::default()
        }
    }

    /// A failed result.
    #[must_use]
    pub fn failed(host: &str, stdout: &str, stderr: &str, error: &str) -> Self {
        Self {
            host: host.to_string(),
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            error: Some(error.to_string()),
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Text shown for a failed host: stderr, else stdout, else the error.
    #[must_use]
    pub fn failure_text(&self) -> &str {
        if !self.stderr.is_empty() {
            &self.stderr
        } else if !self.stdout.is_empty() {
            &self.stdout
        } else {
            self.error.as_deref().unwrap_or_default()
        }
    }
}

/// Everything the fan-out executor returned, in target order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteOutput {
    pub hosts: Vec<HostOutput>,
}

impl RemoteOutput {
    #[must_use]
    pub fn num_errors(&self) -> usize {
        self.hosts.iter().filter(|h| h.is_failure()).count()
    }
}

/// Keep the first two lines of `text`, marking anything dropped.
#[must_use]
pub fn truncate_output(text: &str) -> String {
    let mut lines = text.lines();
    let mut out = lines.next().unwrap_or_default().to_string();
    if let Some(second) = lines.next() {
        out.push('\n');
        out.push_str(second);
    }
    if lines.next().is_some() {
        out.push_str(TRUNCATION_MARKER);
    }
    out
}

/// A host that failed, with its truncated output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostFailure {
    pub host: String,
    pub message: String,
}

impl fmt::Display for HostFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ==> {}", self.host, self.message)
    }
}

/// Aggregate outcome of one fan-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult {
    pub operation: Operation,
    pub total_hosts: usize,
    pub failures: Vec<HostFailure>,
}

impl DispatchResult {
    /// Aggregate `output`; order of hosts does not matter.
    #[must_use]
    pub fn from_output(operation: Operation, output: &RemoteOutput) -> Self {
        let failures = output
            .hosts
            .iter()
            .filter(|h| h.is_failure())
            .map(|h| HostFailure {
                host: h.host.clone(),
                message: truncate_output(h.failure_text()),
            })
            .collect();
        Self {
            operation,
            total_hosts: output.hosts.len(),
            failures,
        }
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.total_hosts - self.failures.len()
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Summary line for this result.
    #[must_use]
    pub fn summary_message(&self) -> String {
        let spec = self.operation.spec();
        if self.is_success() {
            spec.success_message(self.total_hosts)
        } else {
            spec.error_message(self.failed(), self.total_hosts)
        }
    }
}
