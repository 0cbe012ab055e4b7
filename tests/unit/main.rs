//! Unit-level integration suite entry point.

#[path = "../common/mod.rs"]
mod common;
mod pipeline_tests;
mod scenario_tests;
