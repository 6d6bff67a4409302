//! Command implementations

pub mod cluster;
