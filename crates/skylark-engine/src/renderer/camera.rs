/// Horizontal scroll camera for side-view levels.
///
/// Position is smoothed toward a clamped target each tick
/// (`x += (target - x) * smoothing`) — it eases, it never snaps, so fast
/// player motion leaves the camera trailing slightly behind. Vertical is
/// fixed; side scrollers in this engine scroll on one axis.
pub struct ScrollCamera {
    /// Current scroll offset in world units.
    pub x: f32,
    /// Fixed vertical offset.
    pub y: f32,
    /// Visible width in world units.
    pub view_width: f32,
    /// Per-tick smoothing factor (0.0 = frozen, 1.0 = instant snap).
    smoothing: f32,
    /// Upper clamp for the scroll target. Lower clamp is 0.
    max_scroll: f32,
}

impl ScrollCamera {
    pub fn new(view_width: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            view_width,
            smoothing: 1.0,
            max_scroll: f32::MAX,
        }
    }

    /// Set the smoothing factor, clamped into (0, 1].
    pub fn set_smoothing(&mut self, smoothing: f32) {
        self.smoothing = smoothing.clamp(f32::EPSILON, 1.0);
    }

    /// Set the maximum scroll offset. The target is clamped to
    /// `[0, max_scroll]` before smoothing.
    pub fn set_range(&mut self, max_scroll: f32) {
        self.max_scroll = max_scroll.max(0.0);
    }

    /// Ease toward `target_x`. Call once per simulation tick.
    pub fn follow(&mut self, target_x: f32) {
        let clamped = target_x.clamp(0.0, self.max_scroll);
        self.x += (clamped - self.x) * self.smoothing;
    }

    /// Whether a world-space horizontal span is visible under the given
    /// parallax factor. Used to cull scenery before tessellation.
    pub fn sees(&self, x: f32, width: f32, parallax: f32) -> bool {
        let screen_x = x - self.x * parallax;
        screen_x < self.view_width && screen_x + width > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_smoothing_snaps_to_target() {
        let mut cam = ScrollCamera::new(1280.0);
        cam.set_range(4120.0);
        cam.follow(500.0);
        assert!((cam.x - 500.0).abs() < 1e-6);
    }

    #[test]
    fn partial_smoothing_lags_behind() {
        let mut cam = ScrollCamera::new(1280.0);
        cam.set_range(4120.0);
        cam.set_smoothing(0.08);
        cam.follow(1000.0);
        assert!(cam.x > 0.0 && cam.x < 1000.0);
        let first = cam.x;
        cam.follow(1000.0);
        assert!(cam.x > first && cam.x < 1000.0);
    }

    #[test]
    fn target_clamps_at_both_ends() {
        let mut cam = ScrollCamera::new(1280.0);
        cam.set_range(4120.0);
        cam.follow(-300.0);
        assert_eq!(cam.x, 0.0);
        cam.follow(9999.0);
        assert!((cam.x - 4120.0).abs() < 1e-6);
        cam.follow(99999.0);
        assert!((cam.x - 4120.0).abs() < 1e-6);
    }

    #[test]
    fn sees_accounts_for_parallax() {
        let mut cam = ScrollCamera::new(1280.0);
        cam.set_range(10_000.0);
        cam.follow(2000.0);
        // At full scroll factor this span is far off the left edge...
        assert!(!cam.sees(100.0, 200.0, 1.0));
        // ...but the far layer only moved 200 units, so it is still on screen.
        assert!(cam.sees(100.0, 200.0, 0.1));
    }

    #[test]
    fn sees_rejects_beyond_right_edge() {
        let cam = ScrollCamera::new(1280.0);
        assert!(!cam.sees(1281.0, 50.0, 1.0));
        assert!(cam.sees(1279.0, 50.0, 1.0));
    }
}
