//! Static level content, generated once per session.
//!
//! Everything random is resolved here, at generation time, from the seeded
//! engine RNG — notably each window's light-shutoff progress, so the
//! neighborhood lights go out on a fixed per-window schedule with no
//! per-frame flicker. After `World::generate` returns, the level is
//! treated as immutable for the rest of the session.

use skylark_engine::{Color, Rng};

use crate::constants::*;

/// What a platform is, for collision and future level content.
/// The shipped level only places `Ground`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    Ground,
    Obstacle,
    School,
}

/// Static axis-aligned collision rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub kind: PlatformKind,
}

/// A window (or lamp head) with its own light-shutoff progress.
/// Position is relative to the parent scenery object's anchor (x at its
/// left edge, y on the ground line; `ry` is negative going up).
#[derive(Debug, Clone, PartialEq)]
pub struct WindowLight {
    pub rx: f32,
    pub ry: f32,
    pub w: f32,
    pub h: f32,
    /// Day-cycle progress at which this light goes dark, fixed at generation.
    pub shutoff: f32,
}

/// The four scenery kinds, dispatched by discriminant in the draw pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneryKind {
    FarBuilding,
    MidHouse,
    Tree,
    Lamp,
}

/// Decorative object. Anchored at its left edge on the ground line.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneryObject {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: SceneryKind,
    pub windows: Vec<WindowLight>,
}

/// A background star with a twinkle phase offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub phase: f32,
}

/// A landmark structure (the home the player leaves, the school they reach).
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

/// All static level data for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub platforms: Vec<Platform>,
    pub scenery: Vec<SceneryObject>,
    pub stars: Vec<Star>,
    pub home: Structure,
    /// The destination. Crossing `school.x` is the win condition.
    pub school: Structure,
}

// Generation layout.
const STAR_COUNT: usize = 100;
const FAR_STRIDE: f32 = 400.0;
const MID_STRIDE: f32 = 250.0;
/// No midground scenery this close to the home structure.
const MID_RESERVED_ZONE: f32 = 400.0;
const LAMP_START: f32 = 700.0;
const LAMP_STRIDE: f32 = 600.0;

impl World {
    pub fn generate(rng: &mut Rng) -> Self {
        let mut world = Self {
            platforms: Vec::new(),
            scenery: Vec::new(),
            stars: Vec::with_capacity(STAR_COUNT),
            home: Structure {
                x: -100.0,
                width: 350.0,
                height: 400.0,
            },
            school: Structure {
                x: LEVEL_LENGTH - 300.0,
                width: 150.0,
                height: 200.0,
            },
        };

        for _ in 0..STAR_COUNT {
            world.stars.push(Star {
                x: rng.next_f32() * CANVAS_WIDTH,
                y: rng.next_f32() * (CANVAS_HEIGHT / 2.0),
                size: rng.next_f32() * 2.0 + 1.0,
                phase: rng.next_f32(),
            });
        }

        // The road: one ground platform spanning the level plus margin.
        world.platforms.push(Platform {
            x: -500.0,
            y: GROUND_Y,
            width: LEVEL_LENGTH + 1000.0,
            height: 300.0,
            color: palette::GROUND,
            kind: PlatformKind::Ground,
        });

        world.generate_far_buildings(rng);
        world.generate_midground(rng);
        world.generate_lamps(rng);

        world
    }

    fn generate_far_buildings(&mut self, rng: &mut Rng) {
        let mut slot = 0.0;
        while slot < LEVEL_LENGTH {
            if rng.chance(0.7) {
                let width = 200.0 + rng.next_f32() * 200.0;
                let height = 400.0 + rng.next_f32() * 300.0;

                let mut windows = Vec::new();
                let mut wy = 20.0;
                while wy < height - 20.0 {
                    if rng.chance(0.6) {
                        windows.push(Self::far_window(20.0, wy, rng));
                    }
                    if rng.chance(0.6) {
                        windows.push(Self::far_window(width - 30.0, wy, rng));
                    }
                    // Wide buildings get a middle column.
                    if width > 300.0 && rng.chance(0.6) {
                        windows.push(Self::far_window(width / 2.0 - 5.0, wy, rng));
                    }
                    wy += 40.0;
                }

                self.scenery.push(SceneryObject {
                    x: slot,
                    y: GROUND_Y,
                    width,
                    height,
                    kind: SceneryKind::FarBuilding,
                    windows,
                });
            }
            slot += FAR_STRIDE;
        }
    }

    fn far_window(rx: f32, wy: f32, rng: &mut Rng) -> WindowLight {
        WindowLight {
            rx,
            ry: -wy,
            w: 10.0,
            h: 15.0,
            // Tower lights go out between 20% and 80% of the cycle.
            shutoff: 0.2 + rng.next_f32() * 0.6,
        }
    }

    fn generate_midground(&mut self, rng: &mut Rng) {
        let mut slot = 0.0;
        while slot < LEVEL_LENGTH {
            if slot < MID_RESERVED_ZONE {
                slot += MID_STRIDE;
                continue;
            }

            if rng.chance(0.5) {
                let width = 120.0;
                let height = 150.0 + rng.next_f32() * 50.0;

                let mut windows = vec![WindowLight {
                    rx: 20.0,
                    ry: -height + 60.0,
                    w: 20.0,
                    h: 25.0,
                    shutoff: 0.3 + rng.next_f32() * 0.4,
                }];
                if rng.chance(0.5) {
                    windows.push(WindowLight {
                        rx: width - 40.0,
                        ry: -height + 60.0,
                        w: 20.0,
                        h: 25.0,
                        shutoff: 0.3 + rng.next_f32() * 0.4,
                    });
                }

                self.scenery.push(SceneryObject {
                    x: slot + 100.0,
                    y: GROUND_Y,
                    width,
                    height,
                    kind: SceneryKind::MidHouse,
                    windows,
                });
            } else {
                self.scenery.push(SceneryObject {
                    x: slot + 100.0,
                    y: GROUND_Y,
                    width: 80.0,
                    height: 250.0 + rng.next_f32() * 100.0,
                    kind: SceneryKind::Tree,
                    windows: Vec::new(),
                });
            }
            slot += MID_STRIDE;
        }
    }

    fn generate_lamps(&mut self, rng: &mut Rng) {
        let width = 8.0;
        let height = 110.0;
        let mut x = LAMP_START;
        while x < LEVEL_LENGTH {
            self.scenery.push(SceneryObject {
                x,
                y: GROUND_Y,
                width,
                height,
                kind: SceneryKind::Lamp,
                windows: vec![WindowLight {
                    rx: width / 2.0 - 8.0,
                    ry: -height - 16.0,
                    w: 16.0,
                    h: 16.0,
                    // Streetlamps stay on until close to full daylight.
                    shutoff: 0.7 + rng.next_f32() * 0.25,
                }],
            });
            x += LAMP_STRIDE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_world() -> World {
        World::generate(&mut Rng::new(1234))
    }

    #[test]
    fn same_seed_generates_identical_world() {
        let a = World::generate(&mut Rng::new(77));
        let b = World::generate(&mut Rng::new(77));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = World::generate(&mut Rng::new(77));
        let b = World::generate(&mut Rng::new(78));
        assert_ne!(a, b);
    }

    #[test]
    fn ground_spans_level_plus_margin() {
        let world = sample_world();
        assert_eq!(world.platforms.len(), 1);
        let ground = &world.platforms[0];
        assert_eq!(ground.kind, PlatformKind::Ground);
        assert!(ground.x <= 0.0);
        assert!(ground.x + ground.width >= LEVEL_LENGTH);
        assert_eq!(ground.y, GROUND_Y);
    }

    #[test]
    fn starfield_fills_upper_half() {
        let world = sample_world();
        assert_eq!(world.stars.len(), STAR_COUNT);
        for star in &world.stars {
            assert!(star.x >= 0.0 && star.x < CANVAS_WIDTH);
            assert!(star.y >= 0.0 && star.y < CANVAS_HEIGHT / 2.0);
            assert!(star.size >= 1.0 && star.size < 3.0);
            assert!((0.0..1.0).contains(&star.phase));
        }
    }

    #[test]
    fn far_buildings_sit_on_stride_slots() {
        let world = sample_world();
        for obj in world.scenery.iter().filter(|o| o.kind == SceneryKind::FarBuilding) {
            assert_eq!(obj.x % FAR_STRIDE, 0.0, "off-stride building at {}", obj.x);
            assert!(obj.width >= 200.0 && obj.width < 400.0);
            assert!(obj.height >= 400.0 && obj.height < 700.0);
        }
    }

    #[test]
    fn far_windows_fit_parent_and_shutoff_range() {
        let world = sample_world();
        let mut seen_windows = 0;
        for obj in world.scenery.iter().filter(|o| o.kind == SceneryKind::FarBuilding) {
            for w in &obj.windows {
                seen_windows += 1;
                assert!(w.rx >= 0.0 && w.rx + w.w <= obj.width);
                assert!(-w.ry < obj.height);
                assert!((0.2..0.8).contains(&w.shutoff));
            }
        }
        assert!(seen_windows > 0, "expected some far windows");
    }

    #[test]
    fn midground_respects_reserved_zone() {
        let world = sample_world();
        for obj in world
            .scenery
            .iter()
            .filter(|o| matches!(o.kind, SceneryKind::MidHouse | SceneryKind::Tree))
        {
            assert!(
                obj.x >= MID_RESERVED_ZONE,
                "midground object too close to home: {}",
                obj.x
            );
        }
    }

    #[test]
    fn houses_carry_one_or_two_windows() {
        let world = sample_world();
        let mut seen_houses = 0;
        for obj in world.scenery.iter().filter(|o| o.kind == SceneryKind::MidHouse) {
            seen_houses += 1;
            assert!(!obj.windows.is_empty() && obj.windows.len() <= 2);
            for w in &obj.windows {
                assert!((0.3..0.7).contains(&w.shutoff));
            }
        }
        assert!(seen_houses > 0, "expected some houses");
    }

    #[test]
    fn trees_have_no_windows() {
        let world = sample_world();
        for obj in world.scenery.iter().filter(|o| o.kind == SceneryKind::Tree) {
            assert!(obj.windows.is_empty());
        }
    }

    #[test]
    fn lamps_line_the_road() {
        let world = sample_world();
        let lamps: Vec<_> = world
            .scenery
            .iter()
            .filter(|o| o.kind == SceneryKind::Lamp)
            .collect();
        assert!(!lamps.is_empty());
        for lamp in &lamps {
            assert!(lamp.x >= LAMP_START && lamp.x < LEVEL_LENGTH);
            assert_eq!(lamp.windows.len(), 1);
            let head = &lamp.windows[0];
            assert!((0.7..0.95).contains(&head.shutoff));
        }
    }

    #[test]
    fn landmarks_bracket_the_level() {
        let world = sample_world();
        assert_eq!(world.home.x, -100.0);
        assert_eq!(world.school.x, LEVEL_LENGTH - 300.0);
    }
}
