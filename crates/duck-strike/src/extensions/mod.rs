// extensions/mod.rs
//
// Optional helpers that sit outside the physics core.

pub mod easing;

pub use easing::{Easing, lerp_vec2, ease_vec2};
