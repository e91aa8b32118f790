use serde::{Deserialize, Serialize};

use crate::api::types::GameEvent;
use crate::input::queue::InputQueue;
use crate::renderer::canvas::Canvas;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Capacity hint for the canvas vertex buffer.
    pub max_canvas_vertices: usize,
    /// Seed for the game's deterministic random source.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 800.0,
            world_height: 600.0,
            max_canvas_vertices: 16384,
            seed: 1,
        }
    }
}

/// The core contract every game must fulfill.
///
/// `update` runs once per fixed tick and owns all state mutation; `render`
/// takes `&self` and may only write into the canvas. The split is what keeps
/// the simulation deterministic — drawing can never feed back into it.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state: generate the world, place the player.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One simulation tick. Consume input, step physics, emit events.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Read-only draw pass into the canvas.
    fn render(&self, ctx: &mut RenderContext);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub events: Vec<GameEvent>,
}

impl EngineContext {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data. Called by the runner each frame.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw-pass context: the canvas plus a continuously-running wall clock.
///
/// `wall_time` advances every rendered frame regardless of status, so
/// ambient animation (star twinkle and the like) keeps moving while the
/// simulation is paused.
pub struct RenderContext<'a> {
    pub canvas: &'a mut Canvas,
    pub wall_time: f32,
}
