//! Per-frame simulation step
//!
//! One invocation per display refresh. Outside Entering/Playing the tick
//! leaves the state untouched, so a stale scheduled callback is a no-op.

use super::collision::bird_hits_pipe;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Discrete input commands for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Start a run from the menu, or restart from the game-over screen
    pub start: bool,
    /// Flap upward
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
    /// Leave the game-over screen for the menu
    pub menu: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Pause toggle first: a freshly paused frame performs no updates at all
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Idle if input.start => {
            state.begin_run();
            return;
        }
        GamePhase::Over if input.start => state.restart_run(),
        GamePhase::Over if input.menu => {
            state.to_menu();
            return;
        }
        _ => {}
    }

    // Jump is a no-op outside Entering/Playing or with no bird on screen
    if input.jump
        && state.bird.visible
        && matches!(state.phase, GamePhase::Entering | GamePhase::Playing)
    {
        state.bird.vel = state.tuning.jump_impulse;
        state.events.push(GameEvent::Jumped);
    }

    match state.phase {
        GamePhase::Entering => {
            state.enter_ticks = state.enter_ticks.saturating_sub(1);
            if state.enter_ticks == 0 {
                state.phase = GamePhase::Playing;
            }
        }
        GamePhase::Playing => advance_frame(state),
        // Idle, Paused and Over frames change nothing
        _ => {}
    }
}

/// The per-frame contract while Playing: integrate, scroll, score, cull,
/// spawn, collide. Collision always sees this frame's updated positions.
fn advance_frame(state: &mut GameState) {
    // 1. Gravity into velocity, velocity into position
    state.bird.vel += state.tuning.gravity;
    state.bird.y += state.bird.vel;

    // 2. Ground boundary: clamp and end the run
    let ground_y = state.viewport.ground_y();
    let mut game_over = state.bird.y >= ground_y;
    if game_over {
        state.bird.y = ground_y;
    }

    // 3. Scroll pipes; score each one whose trailing edge crossed the bird
    //    this frame (the passed flag makes every pipe worth exactly +1)
    for pipe in &mut state.pipes {
        pipe.x -= state.tuning.scroll_speed;
        if !pipe.passed && pipe.right_edge() < BIRD_X {
            pipe.passed = true;
            state.score += 1;
            state.events.push(GameEvent::Scored);
        }
    }

    // 4. Cull pipes fully off the left edge
    state.pipes.retain(|p| p.right_edge() > 0.0);

    // 5. Spawn once the newest pipe is far enough from the right edge
    let needs_spawn = match state.pipes.last() {
        Some(last) => state.viewport.width - last.x >= SPAWN_DISTANCE,
        None => true,
    };
    if needs_spawn {
        state.spawn_pipe();
    }

    // 6. Collision against every live pipe's solid segments. Scoring above is
    //    independent; when both fire in one frame, Over wins.
    if !game_over {
        game_over = state
            .pipes
            .iter()
            .any(|pipe| bird_hits_pipe(&state.bird, pipe));
    }

    // 7. Terminal transition
    if game_over {
        state.phase = GamePhase::Over;
        state.events.push(GameEvent::GameOver);
        if state.score > state.best_score {
            state.best_score = state.score;
            state.events.push(GameEvent::NewBestScore(state.best_score));
        }
    }
}
