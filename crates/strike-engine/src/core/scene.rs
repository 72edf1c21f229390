use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Simple entity storage using a flat Vec.
/// Designed for small entity counts (a course, not a city).
pub struct Scene {
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            entities: Vec::with_capacity(64),
        }
    }

    /// Add an entity to the scene.
    pub fn spawn(&mut self, entity: Entity) {
        self.entities.push(entity);
    }

    /// Get a reference to an entity by ID.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an entity by ID.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Whether an entity with this ID exists.
    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// World position of an entity, or the origin if it does not exist.
    pub fn position(&self, id: EntityId) -> Vec3 {
        self.get(id).map(|e| e.pos).unwrap_or(Vec3::ZERO)
    }

    /// Toggle an entity's active flag. Unknown IDs are ignored.
    pub fn set_active(&mut self, id: EntityId, active: bool) {
        if let Some(e) = self.get_mut(id) {
            e.active = active;
        }
    }

    /// Whether the entity exists and is active.
    pub fn is_active(&self, id: EntityId) -> bool {
        self.get(id).is_some_and(|e| e.active)
    }

    /// Iterate over all entities mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Find the first entity with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    /// Find all entities with the given tag.
    pub fn find_all_by_tag(&self, tag: &str) -> Vec<&Entity> {
        self.entities.iter().filter(|e| e.tag == tag).collect()
    }

    /// Whether the entity exists and carries the given tag.
    pub fn has_tag(&self, id: EntityId, tag: &str) -> bool {
        self.get(id).is_some_and(|e| e.tag == tag)
    }

    /// Number of entities in the scene.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
