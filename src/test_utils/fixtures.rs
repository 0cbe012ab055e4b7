use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use crate::core::{Category, Entity, EntityContext};

/// Fluent builder for test entities.
#[derive(Debug, Clone)]
pub struct EntityBuilder {
    entity: Entity,
}

impl EntityBuilder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            entity: Entity::new(id, name, Category::Products),
        }
    }

    #[must_use]
    pub const fn category(mut self, category: Category) -> Self {
        self.entity.category = category;
        self
    }

    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        self.entity.description = Some(description.to_string());
        self
    }

    #[must_use]
    pub fn organization(mut self, organization: &str) -> Self {
        self.context_mut().organization = Some(organization.to_string());
        self
    }

    #[must_use]
    pub fn location(mut self, location: &str) -> Self {
        self.context_mut().location = Some(location.to_string());
        self
    }

    #[must_use]
    pub fn subcategory(mut self, subcategory: &str) -> Self {
        self.entity.subcategory = Some(subcategory.to_string());
        self
    }

    #[must_use]
    pub const fn rating(mut self, rating: f64) -> Self {
        self.entity.average_rating = Some(rating);
        self
    }

    #[must_use]
    pub const fn reviews(mut self, count: u64) -> Self {
        self.entity.review_count = Some(count);
        self
    }

    #[must_use]
    pub const fn verified(mut self, verified: bool) -> Self {
        self.entity.is_verified = verified;
        self
    }

    /// Set `createdAt` to midnight UTC on the given day.
    #[must_use]
    pub fn created(mut self, year: i32, month: u32, day: u32) -> Self {
        self.entity.created_at = Some(day_utc(year, month, day));
        self
    }

    #[must_use]
    pub fn build(self) -> Entity {
        self.entity
    }

    fn context_mut(&mut self) -> &mut EntityContext {
        self.entity.context.get_or_insert_with(EntityContext::default)
    }
}

fn day_utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// A small mixed catalog covering every category.
#[must_use]
pub fn sample_catalog() -> Vec<Entity> {
    vec![
        EntityBuilder::new("prof-johnson", "Dr. Sarah Johnson - Professor at MIT")
            .category(Category::Professionals)
            .description("Computer science professor specializing in distributed systems")
            .organization("MIT")
            .location("Cambridge, MA")
            .rating(4.8)
            .reviews(124)
            .verified(true)
            .created(2023, 3, 14)
            .build(),
        EntityBuilder::new("dr-lee", "Dr. Michael Lee")
            .category(Category::Professionals)
            .description("Cardiologist")
            .organization("Boston General Hospital")
            .location("Boston, MA")
            .rating(4.2)
            .reviews(37)
            .created(2022, 11, 2)
            .build(),
        EntityBuilder::new("acme", "Acme Corporation")
            .category(Category::Companies)
            .description("Industrial supplies and tooling")
            .location("Phoenix, AZ")
            .rating(3.1)
            .reviews(58)
            .verified(true)
            .created(2021, 6, 30)
            .build(),
        EntityBuilder::new("blue-bottle", "Blue Bottle Coffee")
            .category(Category::Places)
            .description("Specialty coffee roaster and cafe")
            .location("Oakland, CA")
            .subcategory("Cafe")
            .rating(4.6)
            .reviews(410)
            .created(2020, 1, 8)
            .build(),
        EntityBuilder::new("pixel-9", "Pixel 9 Phone")
            .category(Category::Products)
            .description("Android smartphone")
            .subcategory("Electronics")
            .rating(4.4)
            .reviews(0)
            .created(2024, 8, 20)
            .build(),
    ]
}

/// Test fixture providing an isolated directory for snapshot and config files.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl UnitTestFixture {
    /// Create a fixture; panics if the temp dir cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            data_path,
        }
    }

    /// Create a file with content.
    #[must_use]
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Write `entities` as a JSON snapshot.
    #[must_use]
    pub fn create_snapshot(&self, name: &str, entities: &[Entity]) -> PathBuf {
        let json = serde_json::to_string_pretty(entities).expect("Failed to serialize snapshot");
        self.create_file(name, &json)
    }
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}
