pub mod runner;

pub use runner::MatchRunner;

use std::cell::RefCell;

use duck_strike::{custom_kinds, InputEvent, MatchConfig};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<MatchRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut MatchRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Match not initialized. Call game_init() first.");
        f(runner)
    })
}

fn install(runner: MatchRunner) {
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
}

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Start a match with the default configuration.
#[wasm_bindgen]
pub fn game_init() -> Result<(), JsValue> {
    init_logging();
    let runner = MatchRunner::new(MatchConfig::default())
        .map_err(|err| JsValue::from(js_sys::Error::new(&err.to_string())))?;
    install(runner);
    log::info!("duck-strike: initialized");
    Ok(())
}

/// Start a match from a JSON config. Missing fields take their defaults.
#[wasm_bindgen]
pub fn game_init_with_config(json: &str) -> Result<(), JsValue> {
    init_logging();
    let runner = MatchRunner::from_json(json).map_err(|err| {
        let message = format!("duck-strike: {}", err);
        web_sys::console::error_1(&JsValue::from_str(&message));
        JsValue::from(js_sys::Error::new(&message))
    })?;
    install(runner);
    log::info!("duck-strike: initialized from config");
    Ok(())
}

/// Advance by one browser frame of `dt_ms` milliseconds.
#[wasm_bindgen]
pub fn game_tick(dt_ms: f64) {
    with_runner(|r| r.tick(dt_ms));
}

#[wasm_bindgen]
pub fn game_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn game_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
    with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
}

/// New Game button.
#[wasm_bindgen]
pub fn game_reset() {
    with_runner(|r| {
        r.push_input(InputEvent::Custom {
            kind: custom_kinds::RESET,
            a: 0.0,
            b: 0.0,
            c: 0.0,
        })
    });
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn get_buffer_ptr() -> *const f32 {
    with_runner(|r| r.buffer_ptr())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}

#[wasm_bindgen]
pub fn get_max_bodies() -> u32 {
    with_runner(|r| r.max_bodies())
}

#[wasm_bindgen]
pub fn get_max_posts() -> u32 {
    with_runner(|r| r.max_posts())
}

#[wasm_bindgen]
pub fn get_max_events() -> u32 {
    with_runner(|r| r.max_events())
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width())
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height())
}

/// Full snapshot as JSON, for debugging overlays and tests on the JS side.
#[wasm_bindgen]
pub fn get_snapshot_json() -> String {
    with_runner(|r| r.snapshot_json())
}
