//! Core data types for the konfig build-configuration tool.
//!
//! This crate defines the declarative model a propagation pass works on:
//! the settings manifest, properties files, the project-node tree with its
//! compilation tasks, compiler option sets, forced-version rules, and
//! plugin declarations.
//!
//! This crate is intentionally free of async code and network I/O.

/// File name of the settings manifest that marks a project root.
pub const SETTINGS_FILE: &str = "Konfig.toml";

pub mod options;
pub mod plugin;
pub mod project;
pub mod properties;
pub mod rules;
pub mod settings;
