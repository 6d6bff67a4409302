//! Environment variables consumed by cluster operations and their validation.
//!
//! Resolution takes a lookup function instead of reading the process
//! environment directly, so callers decide where values come from.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::error::EnvError;

/// Environment variables understood by `pxf cluster` operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnvVar {
    /// Database installation root.
    GpHome,
    /// PXF installation root; `bin/pxf` lives under it.
    PxfHome,
    /// Base directory holding `conf`, `lib` and `servers`.
    PxfBase,
    /// Pre-6.x configuration directory, only read by `migrate`.
    PxfConf,
    /// Java runtime used by the agent.
    JavaHome,
}

impl EnvVar {
    /// The variable's name in the process environment.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::GpHome => "GPHOME",
            Self::PxfHome => "PXF_HOME",
            Self::PxfBase => "PXF_BASE",
            Self::PxfConf => "PXF_CONF",
            Self::JavaHome => "JAVA_HOME",
        }
    }
}

impl fmt::Display for EnvVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validated, non-blank values for the variables one operation asked for.
///
/// Built fresh for every invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedEnvironment {
    values: BTreeMap<EnvVar, String>,
}

impl ResolvedEnvironment {
    /// Value of `var`, if it was resolved.
    #[must_use]
    pub fn get(&self, var: EnvVar) -> Option<&str> {
        self.values.get(&var).map(String::as_str)
    }

    /// Number of resolved variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when nothing was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<const N: usize> From<[(EnvVar, &str); N]> for ResolvedEnvironment {
    fn from(pairs: [(EnvVar, &str); N]) -> Self {
        Self {
            values: pairs
                .into_iter()
                .map(|(var, value)| (var, value.to_string()))
                .collect(),
        }
    }
}

/// Resolve `required` and `optional` variables through `lookup`.
///
/// Required variables are checked in order and the first offender is
/// reported; later variables are not inspected. Optional variables are
/// kept only when present and non-blank.
///
/// # Errors
///
/// Returns [`EnvError::MissingVar`] when a required variable is absent and
/// [`EnvError::BlankVar`] when it is set to the empty string.
pub fn resolve<F>(
    required: &[EnvVar],
    optional: &[EnvVar],
    lookup: F,
) -> Result<ResolvedEnvironment, EnvError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut values = BTreeMap::new();
    for &var in required {
        match lookup(var.name()) {
            None => return Err(EnvError::MissingVar(var)),
            Some(value) if value.is_empty() => return Err(EnvError::BlankVar(var)),
            Some(value) => {
                values.insert(var, value);
            }
        }
    }
    for &var in optional {
        if let Some(value) = lookup(var.name()).filter(|v| !v.is_empty()) {
            values.entry(var).or_insert(value);
        }
    }
    Ok(ResolvedEnvironment { values })
}
