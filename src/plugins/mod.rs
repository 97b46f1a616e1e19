//! Plugin composition: locating command groups by identifier and grafting
//! them into a single root dispatcher.
//!
//! A plugin is a module exporting a command group under the name `app`.
//! Modules are either registered in-process or defined declaratively in
//! YAML/JSON files located by their dotted identifier. Resolution failures
//! are per-plugin: a bad identifier is logged and skipped, never fatal to
//! the rest of the composition.

pub mod group;
pub mod registry;
pub mod resolve;
