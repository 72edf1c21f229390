use glam::Vec2;

/// Common key codes (DOM `keyCode` values, which hosts already speak).
pub mod keys {
    pub const ESCAPE: u32 = 27;
    pub const SPACE: u32 = 32;
    pub const B: u32 = 66;
    pub const R: u32 = 82;
}

/// Input event types the engine understands.
/// Generic, no game-specific semantics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Relative mouse motion since the previous event, in device counts.
    /// Positive `dx` is to the right, positive `dy` is away from the user (up).
    MouseMotion { dx: f32, dy: f32 },
    /// Scroll wheel movement. Positive scrolls away from the user.
    Scroll { delta: f32 },
    /// A key was pressed.
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
    /// A custom event from the host (UI buttons, scripted drivers, ...).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// The host pushes events as they arrive; the runner drains them once per frame.
#[derive(Debug)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new input event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    // -- Per-frame axis views --

    /// Sum of all pending mouse motion, as an (x, y) axis pair.
    pub fn mouse_delta(&self) -> Vec2 {
        self.events
            .iter()
            .filter_map(|e| match *e {
                InputEvent::MouseMotion { dx, dy } => Some(Vec2::new(dx, dy)),
                _ => None,
            })
            .sum()
    }

    /// Sum of all pending scroll movement.
    pub fn scroll_delta(&self) -> f32 {
        self.events
            .iter()
            .filter_map(|e| match *e {
                InputEvent::Scroll { delta } => Some(delta),
                _ => None,
            })
            .sum()
    }

    /// Whether `key_code` went down this frame.
    pub fn key_pressed(&self, key_code: u32) -> bool {
        self.events
            .iter()
            .any(|e| matches!(*e, InputEvent::KeyDown { key_code: k } if k == key_code))
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
