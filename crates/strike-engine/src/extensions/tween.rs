// extensions/tween.rs
//
// Position tweens keyed by EntityId, advanced at constant speed.
// Completely decoupled from Entity/Scene internals.
//
// Usage:
//   let mut tweens = TweenState::new();
//   let id = tweens.add(entity_id, Tween::position(from, to, 0.5));
//   tweens.tick(dt, &mut scene);  // Advances all tweens, updates entities
//   tweens.remove(id);            // Cancel before completion

use std::collections::HashMap;

use glam::Vec3;

use super::lerp::lerp_vec3;
use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// A single one-shot move of `Entity.pos` from `from` to `to`.
#[derive(Debug, Clone)]
pub struct Tween {
    pub from: Vec3,
    pub to: Vec3,
    /// Duration in seconds.
    pub duration: f32,
    /// Elapsed time.
    pub elapsed: f32,
    /// Optional id reported through `drain_completed` when the tween finishes.
    pub on_complete: Option<u32>,
}

impl Tween {
    /// Create a position tween.
    pub fn position(from: Vec3, to: Vec3, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
            on_complete: None,
        }
    }

    pub fn with_on_complete(mut self, event_id: u32) -> Self {
        self.on_complete = Some(event_id);
        self
    }

    /// Normalized progress [0, 1].
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Position at the current progress.
    pub fn sample(&self) -> Vec3 {
        lerp_vec3(self.from, self.to, self.progress())
    }

    /// Whether the tween has run its full duration.
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Handle to a tween for later reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TweenId(pub u32);

/// Manages all active tweens.
#[derive(Debug, Default)]
pub struct TweenState {
    tweens: HashMap<TweenId, (EntityId, Tween)>,
    next_id: u32,
    /// Completed tween events to be polled.
    completed_events: Vec<u32>,
}

impl TweenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tween for an entity. Returns a handle for later control.
    pub fn add(&mut self, entity: EntityId, tween: Tween) -> TweenId {
        let id = TweenId(self.next_id);
        self.next_id += 1;
        self.tweens.insert(id, (entity, tween));
        id
    }

    /// Remove (cancel) a tween by handle. A removed tween never reports completion.
    pub fn remove(&mut self, id: TweenId) -> bool {
        self.tweens.remove(&id).is_some()
    }

    /// Whether the tween is still running.
    pub fn contains(&self, id: TweenId) -> bool {
        self.tweens.contains_key(&id)
    }

    /// Advance all tweens and apply to entities in the scene.
    /// Returns the number of tweens that completed this tick.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene) -> usize {
        let mut completed = Vec::new();

        for (&id, (entity_id, tween)) in self.tweens.iter_mut() {
            tween.elapsed += dt;
            if let Some(entity) = scene.get_mut(*entity_id) {
                entity.pos = tween.sample();
            }

            if tween.is_complete() {
                if let Some(event_id) = tween.on_complete {
                    self.completed_events.push(event_id);
                }
                completed.push(id);
            }
        }

        let count = completed.len();
        for id in completed {
            self.tweens.remove(&id);
        }

        count
    }

    /// Drain completed tween events.
    pub fn drain_completed(&mut self) -> impl Iterator<Item = u32> + '_ {
        self.completed_events.drain(..)
    }

    /// Number of active tweens.
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Whether there are no active tweens.
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}
