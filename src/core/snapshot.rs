//! Loading candidate snapshots exported from the data store.
//!
//! A snapshot is JSON: either a bare array of entities or an API-style
//! envelope `{ "entities": [...] }`.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{EsError, Result};

use super::entity::Entity;

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    Bare(Vec<Entity>),
    Envelope { entities: Vec<Entity> },
}

/// Parse a snapshot from JSON text and check id uniqueness.
pub fn parse_candidates(raw: &str) -> Result<Vec<Entity>> {
    let document: SnapshotDocument = serde_json::from_str(raw)
        .map_err(|err| EsError::InvalidCandidates(format!("parse snapshot: {err}")))?;
    let entities = match document {
        SnapshotDocument::Bare(entities) | SnapshotDocument::Envelope { entities } => entities,
    };
    ensure_unique_ids(&entities)?;
    Ok(entities)
}

/// Read a snapshot from `path`, or from stdin when `path` is `-`.
pub fn load_candidates(path: &Path) -> Result<Vec<Entity>> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|err| {
            EsError::InvalidCandidates(format!("read {}: {err}", path.display()))
        })?
    };
    let entities = parse_candidates(&raw)?;
    debug!(target: "snapshot", path = %path.display(), count = entities.len(), "candidates loaded");
    Ok(entities)
}

fn ensure_unique_ids(entities: &[Entity]) -> Result<()> {
    let mut seen = HashSet::with_capacity(entities.len());
    for entity in entities {
        if !seen.insert(entity.id.as_str()) {
            return Err(EsError::InvalidCandidates(format!(
                "duplicate entity id {}",
                entity.id
            )));
        }
    }
    Ok(())
}
