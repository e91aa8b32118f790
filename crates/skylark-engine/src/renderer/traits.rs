//! Renderer trait for host-provided drawing surfaces.
//!
//! The engine produces a flat triangle buffer and a text command list each
//! frame; the host owns the actual surface (WebGPU, Canvas2D, a software
//! framebuffer) and presents the frame. The surface is persistent — the
//! runner holds one renderer for the life of the session and never
//! recreates it.

use crate::renderer::canvas::{Canvas, TextCommand};

/// Complete frame data for presentation.
pub struct Frame<'a> {
    /// Triangle-list vertices (x, y, r, g, b, a per vertex), in screen space.
    pub vertices: &'a [f32],
    /// Text runs to rasterize on top of the shapes.
    pub texts: &'a [TextCommand],
    /// Logical surface width in game units.
    pub world_width: f32,
    /// Logical surface height in game units.
    pub world_height: f32,
}

impl<'a> Frame<'a> {
    pub fn from_canvas(canvas: &'a Canvas, world_width: f32, world_height: f32) -> Self {
        Self {
            vertices: canvas.vertices(),
            texts: canvas.texts(),
            world_width,
            world_height,
        }
    }
}

/// Host-implemented drawing surface.
pub trait Renderer {
    /// Backend identifier (e.g., "webgpu", "canvas2d", "headless").
    fn backend(&self) -> &'static str;

    /// Present a complete frame.
    fn present(&mut self, frame: &Frame);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::canvas::Color;
    use glam::Vec2;

    #[test]
    fn frame_borrows_canvas_buffers() {
        let mut canvas = Canvas::new();
        canvas.fill_rect(Vec2::ZERO, 4.0, 4.0, Color::WHITE);
        let frame = Frame::from_canvas(&canvas, 1280.0, 720.0);
        assert_eq!(frame.vertices.len(), 36);
        assert!(frame.texts.is_empty());
        assert_eq!(frame.world_width, 1280.0);
    }
}
