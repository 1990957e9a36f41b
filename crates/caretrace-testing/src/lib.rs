//! Testing infrastructure for caretrace tests.
//!
//! This crate provides utilities for writing readable tests:
//! - `TestWorld`: isolated data directory plus CLI execution
//! - `assertions`: checks against the JSON output of the CLI
//! - `fixtures`: fluent `SessionEvent` builders and canned sessions

pub mod assertions;
pub mod fixtures;
pub mod world;

pub use fixtures::EventBuilder;
pub use world::{CliResult, TestWorld};
