//! JSON output helpers.
//!
//! Every `--json` run prints exactly one document to stdout: the dispatch
//! summary, a cancellation marker, or the error object.

use anyhow::{Context, Result};

use crate::domain::{DispatchResult, Operation};

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format the summary of a completed fan-out.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_result(result: &DispatchResult) -> Result<String> {
    let obj = serde_json::json!({
        "operation": result.operation,
        "success": result.is_success(),
        "total_hosts": result.total_hosts,
        "succeeded": result.succeeded(),
        "failed": result.failed(),
        "message": result.summary_message(),
        "failures": result.failures,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}

/// Format the marker for an operation the operator declined.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_cancelled(operation: Operation) -> Result<String> {
    let obj = serde_json::json!({
        "operation": operation,
        "cancelled": true,
    });
    serde_json::to_string_pretty(&obj).context("JSON serialization failed")
}
