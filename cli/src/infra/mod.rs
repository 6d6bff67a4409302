//! Infrastructure layer: concrete implementations of application port traits.
//!
//! Process execution, the `psql` catalog reader, the `ssh` fan-out, the
//! local hostname, and the confirmation prompt all live here.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod catalog;
pub mod command_runner;
pub mod env;
pub mod host;
pub mod prompt;
pub mod ssh;
