/// Input events the match understands, in world coordinates.
/// The web layer translates raw mouse/touch events into these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A touch/click began at (x, y).
    PointerDown { x: f32, y: f32 },
    /// A touch/click ended at (x, y).
    PointerUp { x: f32, y: f32 },
    /// A touch/cursor moved to (x, y).
    PointerMove { x: f32, y: f32 },
    /// A UI button (New Game, etc.).
    /// `kind` is one of [`custom_kinds`]; `a`, `b`, `c` carry optional data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// `InputEvent::Custom` kinds.
pub mod custom_kinds {
    /// Zero the score and reset every body to kick-off.
    pub const RESET: u32 = 1;
}

/// A queue of input events.
/// JS pushes events between frames; the runner drains them before ticking.
#[derive(Debug)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Take every pending event, oldest first, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_keeps_order_and_empties() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::PointerMove { x: 40.0, y: 20.0 });
        q.push(InputEvent::PointerUp { x: 60.0, y: 20.0 });
        assert_eq!(q.len(), 3);
        let events = q.drain();
        assert_eq!(events[0], InputEvent::PointerDown { x: 10.0, y: 20.0 });
        assert_eq!(events[2], InputEvent::PointerUp { x: 60.0, y: 20.0 });
        assert!(q.is_empty());
    }

    #[test]
    fn reset_is_a_custom_event() {
        let mut q = InputQueue::new();
        q.push(InputEvent::Custom { kind: custom_kinds::RESET, a: 0.0, b: 0.0, c: 0.0 });
        let first = q.iter().next();
        match first {
            Some(InputEvent::Custom { kind, .. }) => assert_eq!(*kind, custom_kinds::RESET),
            other => panic!("Expected Custom event, got {:?}", other),
        }
    }
}
