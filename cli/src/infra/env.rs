//! Process environment access.

/// Look up `name` in the process environment.
///
/// Values that are not valid Unicode are treated as unset.
#[must_use]
pub fn process_lookup(name: &str) -> Option<String> {
    std::env::var_os(name).and_then(|v| v.into_string().ok())
}
