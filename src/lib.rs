//! Dazed Bird - a Flappy-Bird-style arcade side-scroller
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, run state machine)
//! - `audio`: Web Audio sound effects
//! - `bestscore`: Best-score persistence
//! - `settings`: Volume preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod bestscore;
pub mod settings;
pub mod sim;

pub use settings::{Settings, VolumeChannel};

/// Game configuration constants
///
/// Everything here is layout, not physics: the physics constants live in
/// [`sim::Tuning`] because they vary by device class.
pub mod consts {
    /// The bird's bounding box is a fixed square
    pub const BIRD_SIZE: f32 = 40.0;
    /// The bird never moves horizontally
    pub const BIRD_X: f32 = 100.0;

    /// Pipe width in pixels
    pub const PIPE_WIDTH: f32 = 80.0;
    /// Vertical clearance between a pipe's upper and lower segments
    pub const PIPE_GAP: f32 = 150.0;

    /// Upper-segment height is drawn uniformly from [MIN, MAX)
    pub const MIN_PIPE_HEIGHT: f32 = 50.0;
    pub const MAX_PIPE_HEIGHT: f32 = 300.0;

    /// A new pipe spawns once the newest one is this far from the right edge
    pub const SPAWN_DISTANCE: f32 = 300.0;

    /// Ground strip thickness at the bottom of the viewport
    pub const GROUND_HEIGHT: f32 = 80.0;

    /// Visual-fudge margins on the bird's vertical edges. The sprite is drawn
    /// larger than the box that positions it, so the top of the hitbox is
    /// forgiving while the belly reaches slightly below it.
    pub const TOP_FUDGE: f32 = 12.0;
    pub const BOTTOM_FUDGE: f32 = 11.0;

    /// Frames spent in Entering before gameplay begins (~500ms at 60 Hz)
    pub const ENTER_DELAY_TICKS: u32 = 30;
}
