//! Run state and core simulation types
//!
//! The whole run lives in one [`GameState`] record: UI code reads it, the
//! simulation loop writes it.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Menu screen, no bird on screen
    Idle,
    /// Bird just appeared, short grace delay before physics kicks in
    Entering,
    /// Active gameplay
    Playing,
    /// Gameplay frozen, resumable
    Paused,
    /// Run ended
    Over,
}

/// Fire-and-forget side-effect signals for the host (audio, persistence).
///
/// The simulation queues these and never observes their outcome; a host that
/// drops them on the floor changes nothing about the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The bird flapped
    Jumped,
    /// An obstacle was cleared (+1 score already applied)
    Scored,
    /// The run just ended
    GameOver,
    /// The run beat the previous best score
    NewBestScore(u32),
}

/// Physics constants, selected once at startup by device class and never
/// re-derived afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    /// Downward acceleration (pixels/frame²)
    pub gravity: f32,
    /// Pipe scroll speed (pixels/frame)
    pub scroll_speed: f32,
    /// Velocity set by a jump (negative = upward, pixels/frame)
    pub jump_impulse: f32,
}

impl Tuning {
    pub fn desktop() -> Self {
        Self {
            gravity: 0.3,
            scroll_speed: 2.0,
            jump_impulse: -5.0,
        }
    }

    /// Gentler constants for touch devices
    pub fn mobile() -> Self {
        Self {
            gravity: 0.2,
            scroll_speed: 1.0,
            jump_impulse: -3.0,
        }
    }

    pub fn for_device(mobile: bool) -> Self {
        if mobile { Self::mobile() } else { Self::desktop() }
    }
}

/// Viewport dimensions in pixels, pushed in by the host on resize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Highest `y` the bird can occupy before it is resting on the ground
    pub fn ground_y(&self) -> f32 {
        self.height - GROUND_HEIGHT - BIRD_SIZE
    }
}

/// The player's bird
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    /// Top edge of the bounding box (pixels from the viewport top)
    pub y: f32,
    /// Vertical velocity (pixels/frame, positive = downward)
    pub vel: f32,
    /// Hidden on the menu screen; jump input requires a visible bird
    pub visible: bool,
}

impl Bird {
    /// Spawn at rest, a third of the way down the viewport
    pub fn spawn(viewport: &Viewport) -> Self {
        Self {
            y: viewport.height / 3.0,
            vel: 0.0,
            visible: true,
        }
    }

    pub fn hidden() -> Self {
        Self {
            y: 0.0,
            vel: 0.0,
            visible: false,
        }
    }
}

/// One obstacle pair: an upper and a lower solid segment sharing a gap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    /// Unique, monotonically increasing
    pub id: u32,
    /// Leading (left) edge, decreases every frame
    pub x: f32,
    /// Height of the upper segment; the gap spans [gap_y, gap_y + PIPE_GAP]
    pub gap_y: f32,
    /// Scoring dedupe: set once when the trailing edge crosses the bird
    pub passed: bool,
}

impl Pipe {
    /// Trailing (right) edge
    pub fn right_edge(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    /// Top of the lower solid segment
    pub fn gap_bottom(&self) -> f32 {
        self.gap_y + PIPE_GAP
    }
}

/// Complete run state, owned by the simulation loop
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub phase: GamePhase,
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub bird: Bird,
    /// Live pipes in spawn order, which is also left-to-right order: the list
    /// only appends at the tail and removes from the head region.
    pub pipes: Vec<Pipe>,
    /// Obstacles cleared this run
    pub score: u32,
    /// Best across runs, loaded once at startup
    pub best_score: u32,
    /// Countdown for the Entering -> Playing delay, reset on any state exit
    pub enter_ticks: u32,
    /// Side-effect signals queued this frame, drained by the host
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport, best_score: u32) -> Self {
        Self {
            phase: GamePhase::Idle,
            tuning,
            viewport,
            bird: Bird::hidden(),
            pipes: Vec::new(),
            score: 0,
            best_score,
            enter_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate the next pipe ID
    fn next_pipe_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begin a fresh run from the menu: the bird appears and gameplay starts
    /// once the entering delay has elapsed.
    pub(crate) fn begin_run(&mut self) {
        self.reset_run();
        self.enter_ticks = ENTER_DELAY_TICKS;
        self.phase = GamePhase::Entering;
    }

    /// Restart straight into gameplay from the game-over screen
    pub(crate) fn restart_run(&mut self) {
        self.reset_run();
        self.phase = GamePhase::Playing;
    }

    /// Back to the menu: the bird disappears and the field clears
    pub(crate) fn to_menu(&mut self) {
        self.bird = Bird::hidden();
        self.pipes.clear();
        self.score = 0;
        self.enter_ticks = 0;
        self.phase = GamePhase::Idle;
    }

    fn reset_run(&mut self) {
        self.bird = Bird::spawn(&self.viewport);
        self.pipes.clear();
        self.score = 0;
        self.enter_ticks = 0;
    }

    /// Append one pipe at the right viewport edge with a random gap height
    pub(crate) fn spawn_pipe(&mut self) {
        let gap_y = self.rng.random_range(MIN_PIPE_HEIGHT..MAX_PIPE_HEIGHT);
        let id = self.next_pipe_id();
        self.pipes.push(Pipe {
            id,
            x: self.viewport.width,
            gap_y,
            passed: false,
        });
    }

    /// Host-side resize notification
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Drain the side-effect signals queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuning_by_device_class() {
        let desktop = Tuning::for_device(false);
        assert_eq!(desktop, Tuning::desktop());
        assert!((desktop.gravity - 0.3).abs() < f32::EPSILON);
        assert!((desktop.scroll_speed - 2.0).abs() < f32::EPSILON);
        assert!((desktop.jump_impulse - (-5.0)).abs() < f32::EPSILON);

        let mobile = Tuning::for_device(true);
        assert_eq!(mobile, Tuning::mobile());
        assert!(mobile.gravity < desktop.gravity);
        assert!(mobile.scroll_speed < desktop.scroll_speed);
        assert!(mobile.jump_impulse > desktop.jump_impulse);
    }

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(1, Tuning::desktop(), Viewport::new(800.0, 600.0), 12);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(!state.bird.visible);
        assert!(state.pipes.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 12);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_ground_boundary() {
        let viewport = Viewport::new(800.0, 600.0);
        assert!((viewport.ground_y() - (600.0 - GROUND_HEIGHT - BIRD_SIZE)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bird_spawns_a_third_down() {
        let bird = Bird::spawn(&Viewport::new(800.0, 600.0));
        assert!((bird.y - 200.0).abs() < f32::EPSILON);
        assert_eq!(bird.vel, 0.0);
        assert!(bird.visible);
    }

    #[test]
    fn test_spawn_pipe_at_right_edge_with_bounded_gap() {
        let mut state = GameState::new(7, Tuning::desktop(), Viewport::new(800.0, 600.0), 0);
        for _ in 0..100 {
            state.spawn_pipe();
        }
        for pipe in &state.pipes {
            assert!((pipe.x - 800.0).abs() < f32::EPSILON);
            assert!(pipe.gap_y >= MIN_PIPE_HEIGHT);
            assert!(pipe.gap_y < MAX_PIPE_HEIGHT);
            assert!(!pipe.passed);
        }
        // IDs are unique and monotonic
        for pair in state.pipes.windows(2) {
            assert!(pair[1].id > pair[0].id);
        }
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let mut a = GameState::new(99, Tuning::desktop(), Viewport::new(800.0, 600.0), 0);
        let mut b = GameState::new(99, Tuning::desktop(), Viewport::new(800.0, 600.0), 0);
        for _ in 0..20 {
            a.spawn_pipe();
            b.spawn_pipe();
        }
        assert_eq!(a.pipes, b.pipes);
    }

    #[test]
    fn test_pipe_edges() {
        let pipe = Pipe {
            id: 1,
            x: 500.0,
            gap_y: 120.0,
            passed: false,
        };
        assert!((pipe.right_edge() - (500.0 + crate::consts::PIPE_WIDTH)).abs() < f32::EPSILON);
        assert!((pipe.gap_bottom() - (120.0 + crate::consts::PIPE_GAP)).abs() < f32::EPSILON);
    }
}
