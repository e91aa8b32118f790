//! The draw pass: sky, celestial bodies, parallax scenery, structures and
//! the player, back to front, into the engine canvas.
//!
//! Everything here is read-only over simulation state — the pass takes
//! shared references and only the canvas is mutated. Scroll offsets are
//! fixed per layer: far 0.1x, mid 0.4x, world 1.0x.

use glam::Vec2;
use skylark_engine::{Canvas, Color, ScrollCamera, TextAlign};

use crate::constants::*;
use crate::intro::Intro;
use crate::player::Player;
use crate::sky::{self, DayCycle};
use crate::world::{SceneryKind, SceneryObject, Structure, World};

pub fn draw_frame(
    world: &World,
    player: &Player,
    intro: &Intro,
    cycle: &DayCycle,
    camera: &ScrollCamera,
    wall_time: f32,
    canvas: &mut Canvas,
) {
    let progress = cycle.progress();

    draw_sky(progress, canvas);
    draw_celestials(world, progress, wall_time, canvas);
    draw_far_layer(world, progress, camera, canvas);
    draw_mid_layer(world, progress, camera, canvas);

    let cam = camera.x;
    draw_home(&world.home, cam, canvas);
    draw_school(&world.school, cam, canvas);
    draw_platforms(world, cam, canvas);
    if intro.speech_visible() {
        draw_speech_bubble(&world.home, cam, canvas);
    }
    draw_player(player, cam, canvas);
}

fn draw_sky(progress: f32, canvas: &mut Canvas) {
    let gradient = sky::sky_gradient(progress);
    canvas.fill_vertical_gradient(
        Vec2::ZERO,
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
        gradient.top,
        gradient.bottom,
    );
}

fn draw_celestials(world: &World, progress: f32, wall_time: f32, canvas: &mut Canvas) {
    let moon = sky::moon(progress);
    if moon.alpha > 0.0 {
        canvas.fill_circle(
            Vec2::new(moon.x, moon.y),
            moon.radius,
            Color::WHITE.with_alpha(moon.alpha),
        );
    }

    if sky::stars_visible(progress) {
        for star in &world.stars {
            let alpha = sky::star_alpha(progress, star.phase, wall_time);
            if alpha > 0.0 {
                canvas.fill_circle(
                    Vec2::new(star.x, star.y),
                    star.size,
                    Color::WHITE.with_alpha(alpha),
                );
            }
        }
    }

    if let Some(sun) = sky::sun(progress) {
        let center = Vec2::new(sun.x, sun.y);
        canvas.fill_circle(
            center,
            sun.radius + 30.0,
            palette::SUN_HALO.with_alpha(sun.alpha * 0.35),
        );
        canvas.fill_circle(center, sun.radius, palette::GLOW.with_alpha(sun.alpha));
    }
}

fn draw_far_layer(world: &World, progress: f32, camera: &ScrollCamera, canvas: &mut Canvas) {
    let body = sky::far_building_body(progress);
    let lit_alpha = sky::far_window_alpha(progress);

    for obj in &world.scenery {
        if obj.kind != SceneryKind::FarBuilding {
            continue;
        }
        if !camera.sees(obj.x, obj.width, FAR_PARALLAX) {
            continue;
        }
        let sx = obj.x - camera.x * FAR_PARALLAX;

        // Silhouette with a slightly slanted roofline.
        canvas.fill_polygon(
            &[
                Vec2::new(sx, obj.y),
                Vec2::new(sx, obj.y - obj.height),
                Vec2::new(sx + obj.width, obj.y - obj.height - 10.0),
                Vec2::new(sx + obj.width, obj.y),
            ],
            body,
        );

        for w in &obj.windows {
            let color = if sky::window_lit(progress, w.shutoff) {
                palette::GLOW.with_alpha(lit_alpha)
            } else {
                Color::BLACK.with_alpha(0.3)
            };
            canvas.fill_rect(Vec2::new(sx + w.rx, obj.y + w.ry), w.w, w.h, color);
        }
    }
}

fn draw_mid_layer(world: &World, progress: f32, camera: &ScrollCamera, canvas: &mut Canvas) {
    let tint = sky::mid_tint(progress);

    for obj in &world.scenery {
        // Roof overhangs stick out 10 units; cull with a little slack.
        if !camera.sees(obj.x - 20.0, obj.width + 40.0, MID_PARALLAX) {
            continue;
        }
        let sx = obj.x - camera.x * MID_PARALLAX;

        match obj.kind {
            SceneryKind::FarBuilding => {}
            SceneryKind::Tree => draw_tree(obj, sx, tint, canvas),
            SceneryKind::MidHouse => draw_house(obj, sx, progress, tint, canvas),
            SceneryKind::Lamp => draw_lamp(obj, sx, progress, tint, canvas),
        }
    }
}

fn draw_tree(obj: &SceneryObject, sx: f32, tint: u8, canvas: &mut Canvas) {
    canvas.fill_rect(
        Vec2::new(sx + obj.width / 2.0 - 10.0, obj.y - 40.0),
        20.0,
        40.0,
        palette::TREE_TRUNK,
    );
    canvas.fill_ellipse(
        Vec2::new(sx + obj.width / 2.0, obj.y - obj.height + 40.0),
        Vec2::new(obj.width, obj.height),
        Color::rgb8(20 + tint, 30 + tint, 40 + tint),
    );
}

fn draw_house(obj: &SceneryObject, sx: f32, progress: f32, tint: u8, canvas: &mut Canvas) {
    canvas.fill_rect(
        Vec2::new(sx, obj.y - obj.height),
        obj.width,
        obj.height,
        Color::rgb8(40 + tint, 50 + tint, 60 + tint),
    );
    canvas.fill_polygon(
        &[
            Vec2::new(sx - 10.0, obj.y - obj.height),
            Vec2::new(sx + obj.width / 2.0, obj.y - obj.height - 40.0),
            Vec2::new(sx + obj.width + 10.0, obj.y - obj.height),
        ],
        Color::rgb8(30 + tint, 35 + tint, 45 + tint),
    );

    for w in &obj.windows {
        let color = if sky::window_lit(progress, w.shutoff) {
            palette::GLOW.with_alpha(0.7)
        } else {
            Color::rgba8(10, 10, 20, 128)
        };
        canvas.fill_rect(Vec2::new(sx + w.rx, obj.y + w.ry), w.w, w.h, color);
    }
}

fn draw_lamp(obj: &SceneryObject, sx: f32, progress: f32, tint: u8, canvas: &mut Canvas) {
    canvas.fill_rect(
        Vec2::new(sx, obj.y - obj.height),
        obj.width,
        obj.height,
        Color::rgb8(30 + tint, 35 + tint, 45 + tint),
    );

    if let Some(head) = obj.windows.first() {
        let center = Vec2::new(sx + head.rx + head.w / 2.0, obj.y + head.ry + head.h / 2.0);
        if sky::window_lit(progress, head.shutoff) {
            canvas.fill_circle(center, 26.0, palette::GLOW.with_alpha(0.25));
            canvas.fill_ellipse(
                center,
                Vec2::new(head.w / 2.0, head.h / 2.0),
                palette::GLOW.with_alpha(0.9),
            );
        } else {
            canvas.fill_ellipse(
                center,
                Vec2::new(head.w / 2.0, head.h / 2.0),
                Color::rgba8(10, 10, 20, 128),
            );
        }
    }
}

/// World-space rectangle of the open front door.
fn home_door(home: &Structure) -> (f32, f32, f32, f32) {
    let w = 70.0;
    let h = 120.0;
    (home.x + home.width - 120.0, GROUND_Y - h, w, h)
}

fn draw_home(home: &Structure, cam: f32, canvas: &mut Canvas) {
    let sx = home.x - cam;

    canvas.fill_round_rect(
        Vec2::new(sx, GROUND_Y - home.height),
        home.width,
        home.height,
        8.0,
        palette::HOME_BODY,
    );
    canvas.fill_polygon(
        &[
            Vec2::new(sx - 20.0, GROUND_Y - home.height),
            Vec2::new(sx + home.width / 2.0, GROUND_Y - home.height - 100.0),
            Vec2::new(sx + home.width + 20.0, GROUND_Y - home.height),
        ],
        palette::HOME_ROOF,
    );

    let (door_x, door_y, door_w, door_h) = home_door(home);
    let dx = door_x - cam;

    // Light spilling from the open door onto the road.
    canvas.fill_polygon(
        &[
            Vec2::new(dx, door_y + door_h),
            Vec2::new(dx + door_w, door_y + door_h),
            Vec2::new(dx + door_w + 100.0, door_y + door_h + 50.0),
            Vec2::new(dx - 100.0, door_y + door_h + 50.0),
        ],
        palette::GLOW.with_alpha(0.3),
    );
    canvas.fill_rect(Vec2::new(dx, door_y), door_w, door_h, palette::DOORWAY);

    canvas.fill_round_rect(
        Vec2::new(sx + 40.0, GROUND_Y - 250.0),
        60.0,
        80.0,
        8.0,
        palette::HOME_WINDOW,
    );
    canvas.fill_round_rect(
        Vec2::new(sx + 140.0, GROUND_Y - 250.0),
        60.0,
        80.0,
        8.0,
        palette::HOME_WINDOW,
    );
}

fn draw_school(school: &Structure, cam: f32, canvas: &mut Canvas) {
    let sx = school.x - cam;

    canvas.fill_round_rect(
        Vec2::new(sx, GROUND_Y - 300.0),
        300.0,
        300.0,
        8.0,
        palette::SCHOOL,
    );
    canvas.fill_rect(
        Vec2::new(sx + 20.0, GROUND_Y - 300.0),
        20.0,
        300.0,
        palette::SCHOOL_PILLAR,
    );
    canvas.fill_rect(
        Vec2::new(sx + 260.0, GROUND_Y - 300.0),
        20.0,
        300.0,
        palette::SCHOOL_PILLAR,
    );
    canvas.fill_round_rect_corners(
        Vec2::new(sx + 100.0, GROUND_Y - 140.0),
        100.0,
        140.0,
        [10.0, 10.0, 0.0, 0.0],
        palette::SCHOOL_DOOR,
    );
    canvas.text(
        "ШКОЛА",
        Vec2::new(sx + 95.0, GROUND_Y - 200.0),
        30.0,
        TextAlign::Left,
        Color::BLACK.with_alpha(0.3),
    );
}

fn draw_platforms(world: &World, cam: f32, canvas: &mut Canvas) {
    for plat in &world.platforms {
        let sx = plat.x - cam;
        canvas.fill_rect(Vec2::new(sx, plat.y), plat.width, plat.height, plat.color);
        canvas.fill_rect(
            Vec2::new(sx, plat.y),
            plat.width,
            8.0,
            palette::GROUND_HIGHLIGHT,
        );
    }
}

fn draw_speech_bubble(home: &Structure, cam: f32, canvas: &mut Canvas) {
    let (door_x, door_y, door_w, _) = home_door(home);
    let bx = door_x - cam + door_w / 2.0 + 20.0;
    let by = door_y - 40.0;
    let bubble_w = 200.0;
    let bubble_h = 70.0;

    canvas.fill_round_rect(
        Vec2::new(bx, by - bubble_h),
        bubble_w,
        bubble_h,
        10.0,
        Color::WHITE,
    );
    canvas.stroke_round_rect(
        Vec2::new(bx, by - bubble_h),
        bubble_w,
        bubble_h,
        10.0,
        2.0,
        Color::BLACK,
    );

    // Tail pointing back at the door.
    let tail = [
        Vec2::new(bx + 10.0, by),
        Vec2::new(bx - 10.0, by + 20.0),
        Vec2::new(bx + 30.0, by),
    ];
    canvas.fill_polygon(&tail, Color::WHITE);
    canvas.stroke_polygon(&tail, 2.0, Color::BLACK);

    canvas.text(
        "беги в школу!",
        Vec2::new(bx + bubble_w / 2.0, by - bubble_h + 30.0),
        16.0,
        TextAlign::Center,
        Color::BLACK,
    );
    canvas.text(
        "а то опоздаешь!",
        Vec2::new(bx + bubble_w / 2.0, by - bubble_h + 50.0),
        16.0,
        TextAlign::Center,
        Color::BLACK,
    );
}

fn draw_player(player: &Player, cam: f32, canvas: &mut Canvas) {
    let center_x = player.pos.x + player.size.x / 2.0 - cam;
    let bottom_y = player.pos.y + player.size.y;
    // Grounded motion adds a small vertical bob from the stride phase.
    let bounce = player.run_frame.sin().abs() * 4.0;
    let draw_y = player.pos.y - bounce;

    canvas.fill_ellipse(
        Vec2::new(center_x, bottom_y),
        Vec2::new(15.0, 3.0),
        Color::BLACK.with_alpha(0.2),
    );

    let backpack_offset = if player.facing_right { -12.0 } else { 12.0 };
    canvas.fill_round_rect(
        Vec2::new(center_x + backpack_offset - 10.0, draw_y + 25.0),
        20.0,
        25.0,
        8.0,
        palette::BACKPACK,
    );

    if player.grounded {
        let stride = player.run_frame.sin() * 8.0;
        canvas.fill_rect(
            Vec2::new(center_x - 4.0 - stride, draw_y + 45.0),
            6.0,
            15.0,
            palette::PLAYER_PANTS,
        );
        canvas.fill_rect(
            Vec2::new(center_x - 4.0 + stride, draw_y + 45.0),
            6.0,
            15.0,
            palette::PLAYER_PANTS,
        );
    } else {
        // Fixed split pose while airborne.
        canvas.fill_rect(
            Vec2::new(center_x - 6.0, draw_y + 40.0),
            6.0,
            12.0,
            palette::PLAYER_PANTS,
        );
        canvas.fill_rect(
            Vec2::new(center_x + 2.0, draw_y + 45.0),
            6.0,
            12.0,
            palette::PLAYER_PANTS,
        );
    }

    canvas.fill_round_rect(
        Vec2::new(center_x - 14.0, draw_y + 20.0),
        28.0,
        30.0,
        8.0,
        palette::PLAYER_COAT,
    );

    let eye_x = if player.facing_right { 4.0 } else { -4.0 };
    let head = Vec2::new(center_x, draw_y + 10.0);
    canvas.fill_circle(head, 18.0, palette::PLAYER_SKIN);
    // Hood behind, face in front: two offset circles carve the hood rim.
    canvas.fill_circle(
        Vec2::new(center_x - eye_x * 1.5, draw_y + 10.0),
        18.0,
        palette::PLAYER_HOOD,
    );
    canvas.fill_circle(
        Vec2::new(center_x + eye_x * 0.5, draw_y + 10.0),
        16.0,
        palette::PLAYER_SKIN,
    );
    canvas.fill_circle(
        Vec2::new(center_x + eye_x + 2.0, draw_y + 8.0),
        2.0,
        Color::BLACK,
    );
}
