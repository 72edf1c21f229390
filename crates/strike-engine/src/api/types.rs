use bytemuck::{Pod, Zeroable};

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// A game event handed from game logic to the host.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// Event with a single payload value.
    pub fn new(kind: f32, a: f32) -> Self {
        Self { kind, a, b: 0.0, c: 0.0 }
    }

    /// View a slice of events as the flat float layout hosts read.
    pub fn as_floats(events: &[GameEvent]) -> &[f32] {
        bytemuck::cast_slice(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_flatten_in_field_order() {
        let events = [GameEvent::new(1.0, 2.5), GameEvent { kind: 2.0, a: 0.0, b: 3.0, c: 4.0 }];
        let floats = GameEvent::as_floats(&events);
        assert_eq!(floats.len(), 2 * GameEvent::FLOATS);
        assert_eq!(floats, &[1.0, 2.5, 0.0, 0.0, 2.0, 0.0, 3.0, 4.0]);
    }
}
