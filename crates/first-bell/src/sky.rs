//! Day/night lighting model.
//!
//! A single clamped tick counter drives everything: the sky gradient, the
//! moon sinking out, star visibility, the sun rising after 30% progress,
//! and each window's individual light. Every function here is pure in the
//! progress value — evaluating twice at the same progress gives the same
//! answer, which is what keeps window lights from flickering.

use skylark_engine::Color;

use crate::constants::{palette, CANVAS_HEIGHT, CANVAS_WIDTH, DAY_CYCLE_DURATION};

/// Monotonic simulation clock, clamped at the cycle duration.
/// Advanced once per playing tick; never decreases, never wraps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCycle {
    ticks: u32,
}

impl DayCycle {
    pub fn new() -> Self {
        Self { ticks: 0 }
    }

    pub fn advance(&mut self) {
        self.ticks = (self.ticks + 1).min(DAY_CYCLE_DURATION);
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Normalized fraction of the cycle elapsed, in [0, 1].
    pub fn progress(&self) -> f32 {
        (self.ticks as f32 / DAY_CYCLE_DURATION as f32).min(1.0)
    }
}

impl Default for DayCycle {
    fn default() -> Self {
        Self::new()
    }
}

/// Top and bottom stops of the sky gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyGradient {
    pub top: Color,
    pub bottom: Color,
}

/// Two distinct linear blends split at the halfway mark: deep night easing
/// toward violet dawn, then dawn blowing out into full daylight.
pub fn sky_gradient(progress: f32) -> SkyGradient {
    if progress < 0.5 {
        let t = progress * 2.0;
        SkyGradient {
            top: palette::NIGHT_SKY_TOP,
            bottom: Color::rgb(
                (30.0 + t * 20.0) / 255.0,
                (27.0 + t * 20.0) / 255.0,
                (75.0 + t * 50.0) / 255.0,
            ),
        }
    } else {
        let t = (progress - 0.5) * 2.0;
        SkyGradient {
            top: Color::rgb(
                (2.0 + t * 94.0) / 255.0,
                (6.0 + t * 159.0) / 255.0,
                (23.0 + t * 227.0) / 255.0,
            ),
            bottom: Color::rgb(
                (49.0 + t * 206.0) / 255.0,
                (46.0 + t * 165.0) / 255.0,
                (129.0 - t * 50.0) / 255.0,
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moon {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Fades out as the night ends; skip drawing at or below zero.
    pub alpha: f32,
}

pub fn moon(progress: f32) -> Moon {
    Moon {
        x: CANVAS_WIDTH - 200.0,
        y: 100.0 + progress * 300.0,
        radius: 60.0,
        alpha: 1.0 - progress,
    }
}

/// Stars render only through the first 60% of the cycle.
pub fn stars_visible(progress: f32) -> bool {
    progress < 0.6
}

/// Twinkle alpha for one star. `wall_seconds` is continuously-running
/// render time — deliberately not the simulation clock, so stars keep
/// shimmering while the game is paused.
pub fn star_alpha(progress: f32, phase: f32, wall_seconds: f32) -> f32 {
    if !stars_visible(progress) {
        return 0.0;
    }
    let twinkle = 0.5 + (wall_seconds * 5.0 + phase).sin() * 0.5;
    ((1.0 - progress * 1.5) * twinkle).max(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sun {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub alpha: f32,
}

/// The sun climbs from below the horizon starting at 30% progress.
pub fn sun(progress: f32) -> Option<Sun> {
    if progress <= 0.3 {
        return None;
    }
    Some(Sun {
        x: 400.0,
        y: CANVAS_HEIGHT + 100.0 - (progress - 0.3) * 600.0,
        radius: 80.0,
        alpha: ((progress - 0.3) * 1.5).min(1.0),
    })
}

/// Whether a window with the given shutoff is still lit. Pure in progress:
/// no hysteresis, no flicker.
pub fn window_lit(progress: f32, shutoff: f32) -> bool {
    progress < shutoff
}

/// Far-building silhouette color: near-black at night, washed out by day.
pub fn far_building_body(progress: f32) -> Color {
    if progress < 0.5 {
        palette::FAR_BUILDING_NIGHT
    } else {
        palette::FAR_BUILDING_DAY
    }
}

/// Additive per-channel brightening for the midground once day breaks.
pub fn mid_tint(progress: f32) -> u8 {
    if progress > 0.5 {
        20
    } else {
        0
    }
}

/// Lit far windows dim as ambient light rises.
pub fn far_window_alpha(progress: f32) -> f32 {
    if progress < 0.5 {
        0.5
    } else {
        0.2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_monotone_and_clamped() {
        let mut cycle = DayCycle::new();
        let mut last = 0;
        for _ in 0..(DAY_CYCLE_DURATION + 500) {
            cycle.advance();
            assert!(cycle.ticks() >= last);
            last = cycle.ticks();
        }
        assert_eq!(cycle.ticks(), DAY_CYCLE_DURATION);
        cycle.advance();
        assert_eq!(cycle.ticks(), DAY_CYCLE_DURATION, "stays clamped, no wrap");
        assert_eq!(cycle.progress(), 1.0);
    }

    #[test]
    fn gradient_starts_in_deep_night() {
        let g = sky_gradient(0.0);
        assert_eq!(g.top, palette::NIGHT_SKY_TOP);
        assert!((g.bottom.r - 30.0 / 255.0).abs() < 1e-6);
        assert!((g.bottom.b - 75.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn gradient_ends_in_daylight() {
        let g = sky_gradient(1.0);
        assert!((g.top.r - 96.0 / 255.0).abs() < 1e-6);
        assert!((g.top.g - 165.0 / 255.0).abs() < 1e-6);
        assert!((g.top.b - 250.0 / 255.0).abs() < 1e-6);
        assert!((g.bottom.b - 79.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn gradient_halves_use_distinct_blends() {
        let before = sky_gradient(0.499);
        let after = sky_gradient(0.501);
        // The top stop jumps formulas at the split.
        assert_ne!(before.top, after.top);
    }

    #[test]
    fn moon_sinks_and_fades() {
        let early = moon(0.0);
        let late = moon(0.9);
        assert!(late.y > early.y);
        assert!(late.alpha < early.alpha);
        assert!(moon(1.0).alpha <= 0.0);
    }

    #[test]
    fn stars_cut_off_at_sixty_percent() {
        assert!(stars_visible(0.59));
        assert!(!stars_visible(0.6));
        assert_eq!(star_alpha(0.7, 0.5, 123.0), 0.0);
    }

    #[test]
    fn star_alpha_twinkles_with_wall_clock() {
        let a = star_alpha(0.1, 0.3, 0.0);
        let b = star_alpha(0.1, 0.3, 0.2);
        assert_ne!(a, b, "wall clock drives the twinkle");
        for i in 0..100 {
            let alpha = star_alpha(0.1, 0.3, i as f32 * 0.05);
            assert!((0.0..=1.0).contains(&alpha));
        }
    }

    #[test]
    fn sun_rises_after_thirty_percent() {
        assert!(sun(0.3).is_none());
        let low = sun(0.35).unwrap();
        let high = sun(0.9).unwrap();
        assert!(high.y < low.y, "sun climbs as progress grows");
        assert!(high.alpha > low.alpha);
        assert!(low.y > CANVAS_HEIGHT, "starts below the horizon");
    }

    #[test]
    fn window_lit_is_pure_in_progress() {
        for &(progress, shutoff) in &[(0.1, 0.5), (0.5, 0.5), (0.49999, 0.5), (0.9, 0.95)] {
            let first = window_lit(progress, shutoff);
            for _ in 0..10 {
                assert_eq!(window_lit(progress, shutoff), first);
            }
        }
        assert!(window_lit(0.3, 0.5));
        assert!(!window_lit(0.5, 0.5), "boundary is exclusive");
    }
}
