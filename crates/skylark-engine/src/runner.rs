//! Session runner: wires a game, the input queue, the canvas and a host
//! renderer into one frame loop.
//!
//! The host drives `frame(dt)` from its own recurring callback. The runner
//! steps the simulation at a fixed rate only while the host-owned status is
//! `Playing`; rendering runs in every status. The session state (the game
//! struct, context, camera inside the game) lives here across frames — it
//! is constructed once and never rebuilt per tick.

use crate::api::game::{EngineContext, Game, GameConfig, RenderContext};
use crate::api::types::{GameEvent, GameStatus};
use crate::core::time::FixedTimestep;
use crate::input::queue::{InputEvent, InputQueue};
use crate::renderer::canvas::Canvas;
use crate::renderer::traits::{Frame, Renderer};

/// Generic game runner owning one session.
pub struct GameRunner<G: Game, R: Renderer> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    canvas: Canvas,
    timestep: FixedTimestep,
    config: GameConfig,
    status: GameStatus,
    /// The host surface. `None` means the surface could not be acquired;
    /// the loop then degrades to a silent no-op instead of crashing.
    renderer: Option<R>,
    wall_time: f32,
    warned_no_surface: bool,
    initialized: bool,
}

impl<G: Game, R: Renderer> GameRunner<G, R> {
    pub fn new(game: G, renderer: Option<R>) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let canvas = Canvas::with_capacity(config.max_canvas_vertices);

        Self {
            game,
            ctx: EngineContext::new(),
            input: InputQueue::new(),
            canvas,
            timestep,
            config,
            status: GameStatus::NotStarted,
            renderer,
            wall_time: 0.0,
            warned_no_surface: false,
            initialized: false,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.game.init(&mut self.ctx);
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Write the externally-owned session status.
    pub fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Events emitted during the most recent frame. The host reads these
    /// after `frame()` to drive its own status machine.
    pub fn events(&self) -> &[GameEvent] {
        &self.ctx.events
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Run one host frame: step the simulation (while playing), draw, present.
    pub fn frame(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }
        if self.renderer.is_none() {
            if !self.warned_no_surface {
                log::warn!("no drawing surface; frame loop is a no-op");
                self.warned_no_surface = true;
            }
            return;
        }

        // Wall clock runs in every status so ambient animation survives pause.
        self.wall_time += dt;

        self.ctx.clear_frame_data();

        if self.status == GameStatus::Playing {
            let steps = self.timestep.advance(dt);
            for _ in 0..steps {
                self.game.update(&mut self.ctx, &self.input);
            }
        }

        // Drain after update; events arriving while not playing are dropped.
        self.input.drain();

        self.canvas.clear();
        {
            let mut render_ctx = RenderContext {
                canvas: &mut self.canvas,
                wall_time: self.wall_time,
            };
            self.game.render(&mut render_ctx);
        }

        let frame = Frame::from_canvas(&self.canvas, self.config.world_width, self.config.world_height);
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.present(&frame);
        }
    }
}

/// Recurring frame-callback capability supplied by the host environment.
///
/// The engine never owns a timer; it holds a registration handle obtained
/// from the host and returns it on teardown. Hosts are likewise responsible
/// for releasing their keyboard subscriptions when the driver stops.
pub trait Scheduler {
    type Handle;

    /// Register the recurring frame callback. Returns the cancellation handle.
    fn register(&mut self) -> Self::Handle;

    /// Cancel a previous registration.
    fn cancel(&mut self, handle: Self::Handle);
}

/// Owns a scheduler registration and guarantees cancellation on every exit
/// path, including unwinds — the handle is released in `Drop`.
pub struct FrameDriver<S: Scheduler> {
    scheduler: S,
    handle: Option<S::Handle>,
}

impl<S: Scheduler> FrameDriver<S> {
    /// Register the frame callback and take ownership of the handle.
    pub fn start(mut scheduler: S) -> Self {
        let handle = scheduler.register();
        Self {
            scheduler,
            handle: Some(handle),
        }
    }

    /// Whether the registration is still live.
    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// Cancel the registration early. Safe to call more than once.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.scheduler.cancel(handle);
        }
    }
}

impl<S: Scheduler> Drop for FrameDriver<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
