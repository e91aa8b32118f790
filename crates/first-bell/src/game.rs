//! Session wiring: one owned struct holding the whole simulation, stepped
//! by the engine runner while the host-owned status is `Playing`.

use skylark_engine::{
    EngineContext, Game, GameConfig, GameEvent, InputLatch, InputQueue, KeyBindings,
    RenderContext, Rng, ScrollCamera,
};

use crate::constants::*;
use crate::draw;
use crate::intro::Intro;
use crate::player::{Controls, Player};
use crate::sky::DayCycle;
use crate::world::World;

/// Game event kinds (game -> host).
pub const EVENT_WIN: f32 = 1.0;
pub const EVENT_PAUSE: f32 = 2.0;

const WORLD_SEED: u64 = 9157;

fn session_config() -> GameConfig {
    GameConfig {
        world_width: CANVAS_WIDTH,
        world_height: CANVAS_HEIGHT,
        seed: WORLD_SEED,
        ..GameConfig::default()
    }
}

/// Unclamped camera target: a third of the screen behind the player, biased
/// ahead of the facing direction.
pub fn camera_target(player_x: f32, facing_right: bool) -> f32 {
    let look_ahead = if facing_right {
        LOOK_AHEAD_RIGHT
    } else {
        LOOK_AHEAD_LEFT
    };
    player_x - CANVAS_WIDTH / 3.0 + look_ahead
}

pub struct FirstBell {
    pub world: World,
    pub player: Player,
    pub intro: Intro,
    pub cycle: DayCycle,
    pub camera: ScrollCamera,
    latch: InputLatch,
    bindings: KeyBindings,
    /// One-shot win trigger; never re-fires once set.
    won: bool,
}

impl FirstBell {
    pub fn new() -> Self {
        let mut game = Self {
            world: World::generate(&mut Rng::new(session_config().seed)),
            player: Player::spawn(),
            intro: Intro::new(),
            cycle: DayCycle::new(),
            camera: Self::make_camera(),
            latch: InputLatch::new(),
            bindings: KeyBindings::default(),
            won: false,
        };
        game.camera.follow(camera_target(game.player.pos.x, true));
        game
    }

    fn make_camera() -> ScrollCamera {
        let mut camera = ScrollCamera::new(CANVAS_WIDTH);
        camera.set_smoothing(CAMERA_SMOOTHING);
        camera.set_range(LEVEL_LENGTH - CANVAS_WIDTH + CAMERA_CLAMP_MARGIN);
        camera
    }
}

impl Default for FirstBell {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for FirstBell {
    fn config(&self) -> GameConfig {
        session_config()
    }

    fn init(&mut self, _ctx: &mut EngineContext) {
        // Remount: rebuild the session from scratch. The intro is not
        // restartable any other way.
        *self = Self::new();
        log::info!(
            "first-bell: level ready ({} scenery objects, {} stars)",
            self.world.scenery.len(),
            self.world.stars.len()
        );
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        for event in input.iter() {
            // The cutscene owns movement; the pause key still gets through.
            if self.intro.active && !self.bindings.is_pause_down(event) {
                continue;
            }
            self.latch.apply(event, &self.bindings);
        }

        if self.latch.take_pause_request() {
            ctx.emit_event(GameEvent::signal(EVENT_PAUSE));
        }

        self.cycle.advance();

        let controls = Controls {
            left: self.latch.left_held(),
            right: self.latch.right_held(),
            jump: self.latch.take_jump_request(),
        };
        self.player
            .step(controls, &mut self.intro, &self.world.platforms);

        self.camera
            .follow(camera_target(self.player.pos.x, self.player.facing_right));

        if !self.won && self.player.pos.x > self.world.school.x {
            self.won = true;
            ctx.emit_event(GameEvent::signal(EVENT_WIN));
        }
    }

    fn render(&self, ctx: &mut RenderContext) {
        draw::draw_frame(
            &self.world,
            &self.player,
            &self.intro,
            &self.cycle,
            &self.camera,
            ctx.wall_time,
            ctx.canvas,
        );
    }
}
