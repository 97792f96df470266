//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display refresh
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, bird_hitbox, bird_hits_pipe};
pub use state::{Bird, GameEvent, GamePhase, GameState, Pipe, Tuning, Viewport};
pub use tick::{TickInput, tick};
