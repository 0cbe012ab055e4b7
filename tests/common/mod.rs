//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use entity_search::core::{Category, Entity};
use entity_search::test_utils::EntityBuilder;

pub fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

/// Five products and three non-products, deliberately out of name order.
pub fn mixed_catalog() -> Vec<Entity> {
    vec![
        EntityBuilder::new("p-zen", "Zen Headphones").category(Category::Products).build(),
        EntityBuilder::new("c-acme", "Acme Corp").category(Category::Companies).build(),
        EntityBuilder::new("p-kettle", "kettle pro").category(Category::Products).build(),
        EntityBuilder::new("pl-park", "Central Park").category(Category::Places).build(),
        EntityBuilder::new("p-blender", "Blender 3000").category(Category::Products).build(),
        EntityBuilder::new("p-mouse", "Mouse Pad").category(Category::Products).build(),
        EntityBuilder::new("pr-doe", "Dr. Jane Doe").category(Category::Professionals).build(),
        EntityBuilder::new("p-apple", "Apple Watch").category(Category::Products).build(),
    ]
}

pub fn names(entities: &[Entity]) -> Vec<&str> {
    entities.iter().map(|e| e.name.as_str()).collect()
}

pub fn ids(entities: &[Entity]) -> Vec<&str> {
    entities.iter().map(|e| e.id.as_str()).collect()
}
