//! Player simulation: the per-tick physics and collision step.
//!
//! Explicit Euler at one tick per frame. Horizontal control is
//! acceleration plus multiplicative friction (exponential decay, not
//! additive drag), clamped to a max speed. Collision resolution classifies
//! every overlapping platform as exactly one of landing / head-bump /
//! side-push, using the pre-integration vertical position against the
//! platform edges with a small tolerance band.

use glam::Vec2;

use crate::constants::*;
use crate::intro::Intro;
use crate::world::Platform;

/// Held/consumed input for one tick, already latched by the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    /// Edge-triggered jump request, consumed whether or not it is honored.
    pub jump: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Resting on top of a platform. Recomputed from scratch every tick.
    pub grounded: bool,
    pub facing_right: bool,
    /// Leg-stride phase; advances only while grounded and moving, and also
    /// drives the vertical bob in the draw pass.
    pub run_frame: f32,
}

impl Player {
    /// The child on the doorstep, a step out from home.
    pub fn spawn() -> Self {
        Self {
            pos: Vec2::new(280.0, GROUND_Y - 100.0),
            vel: Vec2::ZERO,
            size: Vec2::new(30.0, 60.0),
            grounded: false,
            facing_right: true,
            run_frame: 0.0,
        }
    }

    /// One simulation tick. Runs only while the session is playing.
    pub fn step(&mut self, controls: Controls, intro: &mut Intro, platforms: &[Platform]) {
        if intro.active {
            // The cutscene owns facing and horizontal motion.
            self.facing_right = intro.tick();
            self.vel.x = 0.0;
            self.vel.y += GRAVITY;
        } else {
            if controls.left {
                self.vel.x -= MOVE_SPEED;
                self.facing_right = false;
            }
            if controls.right {
                self.vel.x += MOVE_SPEED;
                self.facing_right = true;
            }

            self.vel.x *= FRICTION;
            self.vel.y += GRAVITY;
            self.vel.x = self.vel.x.clamp(-MAX_SPEED, MAX_SPEED);

            // A jump request is honored only from the ground; an airborne
            // request is discarded, not buffered.
            if controls.jump && self.grounded {
                self.vel.y = JUMP_FORCE;
                self.grounded = false;
            }
        }

        self.pos += self.vel;

        if self.vel.x.abs() > 0.5 && self.grounded {
            self.run_frame += 0.2;
        } else {
            self.run_frame = 0.0;
        }

        self.resolve_collisions(platforms);
    }

    fn overlaps(&self, plat: &Platform) -> bool {
        self.pos.x < plat.x + plat.width
            && self.pos.x + self.size.x > plat.x
            && self.pos.y < plat.y + plat.height
            && self.pos.y + self.size.y > plat.y
    }

    fn resolve_collisions(&mut self, platforms: &[Platform]) {
        self.grounded = false;
        for plat in platforms {
            if !self.overlaps(plat) {
                continue;
            }

            // Vertical position before this tick's integration.
            let prev_y = self.pos.y - self.vel.y;

            if prev_y + self.size.y <= plat.y + LANDING_TOLERANCE {
                // Came down from above (within the tolerance band): land.
                self.pos.y = plat.y - self.size.y;
                self.vel.y = 0.0;
                self.grounded = true;
            } else if self.vel.y < 0.0 && prev_y >= plat.y + plat.height {
                // Rising into the underside: head bump.
                self.pos.y = plat.y + plat.height;
                self.vel.y = 0.0;
            } else if self.vel.x > 0.0 {
                self.pos.x = plat.x - self.size.x;
                self.vel.x = 0.0;
            } else if self.vel.x < 0.0 {
                self.pos.x = plat.x + plat.width;
                self.vel.x = 0.0;
            }
        }
    }
}
