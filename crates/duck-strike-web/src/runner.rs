use duck_strike::bridge::protocol::ProtocolLayout;
use duck_strike::{
    Clock, ConfigError, FixedTimestep, FrameBuffer, InputEvent, InputQueue, ManualClock, Match,
    MatchConfig, MatchEvent, Millis, Snapshot, Vec2,
};

/// Simulation steps per second.
pub const TICK_RATE: f64 = 60.0;

/// Drives one match from browser frames.
///
/// `lib.rs` keeps a single runner in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct MatchRunner {
    game: Match<ManualClock>,
    input: InputQueue,
    timestep: FixedTimestep,
    frame: FrameBuffer,
    /// Every event raised during the last frame, across all its steps.
    events: Vec<MatchEvent>,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            game: Match::new(config)?,
            input: InputQueue::new(),
            timestep: FixedTimestep::new(1000.0 / TICK_RATE),
            frame: FrameBuffer::new(ProtocolLayout::default()),
            events: Vec::new(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::new(MatchConfig::from_json(json)?)
    }

    /// Queue an input event for the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one browser frame of `frame_ms` milliseconds: apply queued input,
    /// step the match at the fixed rate, then repack the frame buffer.
    pub fn tick(&mut self, frame_ms: Millis) {
        self.events.clear();

        for event in self.input.drain() {
            self.game.handle_input(&event);
        }

        let steps = self.timestep.accumulate(frame_ms);
        for _ in 0..steps {
            self.game.clock_mut().advance(self.timestep.dt());
            let report = self.game.tick();
            self.events.extend(report.events);
        }

        let field = self.game.field();
        let world = Vec2::new(field.width, field.height);
        self.frame.write(&self.game.snapshot(), &self.events, world);
    }

    pub fn game(&self) -> &Match<ManualClock> {
        &self.game
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.events
    }

    pub fn snapshot(&self) -> Snapshot {
        self.game.snapshot()
    }

    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.game.snapshot()).unwrap_or_else(|err| {
            log::error!("Snapshot serialization failed: {}", err);
            String::new()
        })
    }

    pub fn now(&self) -> Millis {
        self.game.clock().now()
    }

    // ---- Frame buffer accessors ----

    pub fn buffer_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.frame.layout().buffer_total_floats as u32
    }

    pub fn max_bodies(&self) -> u32 {
        self.frame.layout().max_bodies as u32
    }

    pub fn max_posts(&self) -> u32 {
        self.frame.layout().max_posts as u32
    }

    pub fn max_events(&self) -> u32 {
        self.frame.layout().max_events as u32
    }

    pub fn world_width(&self) -> f32 {
        self.game.field().width
    }

    pub fn world_height(&self) -> f32 {
        self.game.field().height
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duck_strike::bridge::protocol::{HEADER_BODY_COUNT, HEADER_TICK, HEADER_TURN_COMPLETE};
    use duck_strike::{custom_kinds, Side};

    const FRAME: Millis = 1000.0 / 60.0;

    #[test]
    fn one_frame_is_one_step() {
        let mut runner = MatchRunner::new(MatchConfig::default()).unwrap();
        runner.tick(FRAME);
        assert_eq!(runner.game().tick_count(), 1);
        assert!((runner.now() - FRAME).abs() < 1e-9);
        assert_eq!(runner.frame().header(HEADER_TICK), 1.0);
        assert_eq!(runner.frame().header(HEADER_BODY_COUNT), 11.0);
    }

    #[test]
    fn short_frames_accumulate() {
        let mut runner = MatchRunner::new(MatchConfig::default()).unwrap();
        runner.tick(6.0);
        runner.tick(6.0);
        assert_eq!(runner.game().tick_count(), 0);
        runner.tick(6.0);
        assert_eq!(runner.game().tick_count(), 1);
    }

    #[test]
    fn pointer_drag_starts_a_shot() {
        let mut runner = MatchRunner::new(MatchConfig::default()).unwrap();
        let start = runner.game().players()[0].body.pos;
        runner.push_input(InputEvent::PointerDown { x: start.x, y: start.y });
        runner.push_input(InputEvent::PointerMove { x: start.x - 60.0, y: start.y });
        runner.push_input(InputEvent::PointerUp { x: start.x - 60.0, y: start.y });
        runner.tick(FRAME);

        assert!(runner
            .events()
            .iter()
            .any(|e| matches!(e, MatchEvent::ShotFired { side: Side::Player, .. })));
        assert_eq!(runner.frame().header(HEADER_TURN_COMPLETE), 0.0);
    }

    #[test]
    fn reset_event_reaches_the_match() {
        let mut runner = MatchRunner::new(MatchConfig::default()).unwrap();
        runner.push_input(InputEvent::Custom { kind: custom_kinds::RESET, a: 0.0, b: 0.0, c: 0.0 });
        runner.tick(FRAME);
        assert!(runner.events().contains(&MatchEvent::MatchReset));
    }

    #[test]
    fn bad_config_json_is_reported() {
        assert!(MatchRunner::from_json(r#"{ "restitution": 2.0 }"#).is_err());
        assert!(MatchRunner::from_json("not json").is_err());
    }

    #[test]
    fn snapshot_json_is_valid() {
        let runner = MatchRunner::from_json(r#"{ "seed": 42 }"#).unwrap();
        let value: serde_json::Value = serde_json::from_str(&runner.snapshot_json()).unwrap();
        assert_eq!(value["players"].as_array().map(Vec::len), Some(10));
    }
}
