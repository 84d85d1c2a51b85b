//! Subcommand implementations.

pub(crate) mod call;
pub(crate) mod config;
pub(crate) mod session;
pub(crate) mod tools;
