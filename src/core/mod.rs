//! Core entity types and candidate snapshots

pub mod entity;
pub mod snapshot;

pub use entity::{Category, Entity, EntityContext};
pub use snapshot::{load_candidates, parse_candidates};
