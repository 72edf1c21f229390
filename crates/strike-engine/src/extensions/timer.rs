// extensions/timer.rs
//
// One-shot delayed payloads, ticked by the game clock.
// Like tweens, timers are owned by the game and cancelled by handle, so a
// replaced sequence never fires its stale continuation.
//
// Usage:
//   let mut timers = TimerState::new();
//   let id = timers.start(1.0, Wake::Return);
//   for fired in timers.tick(dt) { ... }
//   timers.cancel(id);

use std::collections::HashMap;

/// Handle to a pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone)]
struct Timer<E> {
    remaining: f32,
    payload: E,
}

/// Pending one-shot timers carrying a payload of type `E`.
#[derive(Debug)]
pub struct TimerState<E: Copy> {
    timers: HashMap<TimerId, Timer<E>>,
    next_id: u32,
}

impl<E: Copy> TimerState<E> {
    pub fn new() -> Self {
        Self {
            timers: HashMap::new(),
            next_id: 0,
        }
    }

    /// Schedule `payload` to fire after `delay` seconds.
    /// A delay of zero (or less) fires on the next tick.
    pub fn start(&mut self, delay: f32, payload: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(id, Timer { remaining: delay.max(0.0), payload });
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Seconds left before the timer fires.
    pub fn remaining(&self, id: TimerId) -> Option<f32> {
        self.timers.get(&id).map(|t| t.remaining)
    }

    /// Advance all timers by `dt` and return the payloads that fired,
    /// in the order they were started.
    pub fn tick(&mut self, dt: f32) -> Vec<E> {
        let mut fired: Vec<(TimerId, E)> = Vec::new();
        for (&id, timer) in self.timers.iter_mut() {
            timer.remaining -= dt;
            if timer.remaining <= 0.0 {
                fired.push((id, timer.payload));
            }
        }
        fired.sort_by_key(|(id, _)| id.0);
        for (id, _) in &fired {
            self.timers.remove(id);
        }
        fired.into_iter().map(|(_, payload)| payload).collect()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<E: Copy> Default for TimerState<E> {
    fn default() -> Self {
        Self::new()
    }
}
