//! Lyon-based shape canvas.
//!
//! Games draw in screen space with filled and stroked primitives; the canvas
//! tessellates them on the CPU into a flat per-vertex-color triangle buffer
//! that the host renderer uploads as-is. Coordinates are y-down with the
//! origin at the top-left, matching the logical drawing surface.
//!
//! Text is not tessellated — it goes into a side-channel command list the
//! host rasterizes with its own font.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::{point, Box2D};
use lyon::path::builder::BorderRadii;
use lyon::path::{Path, Winding};
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, FillVertexConstructor,
    StrokeOptions, StrokeTessellator, StrokeVertex, StrokeVertexConstructor, VertexBuffers,
};

/// Per-vertex data for shape rendering.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct ShapeVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ShapeVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24
}

/// RGBA color for drawing operations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a color from RGBA components (0.0 - 1.0).
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color from RGB components.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGB u8 values (0-255) with full opacity.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Create a color from RGBA u8 values (0-255).
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create a color with the given alpha value.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    // Named color constants
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Horizontal anchoring for a text command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// A text run for the host to rasterize. Position is the baseline start
/// (or center, under `TextAlign::Center`) in screen space.
#[derive(Debug, Clone)]
pub struct TextCommand {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub align: TextAlign,
    pub color: Color,
}

/// Vertex constructor for lyon fill tessellation.
struct FillVertexCtor {
    color: Color,
}

impl FillVertexConstructor<ShapeVertex> for FillVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> ShapeVertex {
        ShapeVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// Vertex constructor for lyon stroke tessellation.
struct StrokeVertexCtor {
    color: Color,
}

impl StrokeVertexConstructor<ShapeVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> ShapeVertex {
        ShapeVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// Per-frame draw surface.
///
/// Holds lyon tessellators, the flat output vertex buffer, and the text
/// side-channel. Cleared by the runner at the start of each frame and
/// repopulated by the game's draw pass.
pub struct Canvas {
    fill_tess: FillTessellator,
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<ShapeVertex, u32>,
    buffer: Vec<f32>,
    texts: Vec<TextCommand>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::with_capacity(16384)
    }

    /// Create a canvas with a vertex capacity hint.
    pub fn with_capacity(max_vertices: usize) -> Self {
        Self {
            fill_tess: FillTessellator::new(),
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(max_vertices * ShapeVertex::FLOATS),
            texts: Vec::new(),
        }
    }

    /// Clear all draw data. Called at the start of each frame.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.texts.clear();
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / ShapeVertex::FLOATS
    }

    /// The flat triangle-list buffer (x, y, r, g, b, a per vertex).
    pub fn vertices(&self) -> &[f32] {
        &self.buffer
    }

    /// Raw pointer to the flat float buffer for zero-copy host reads.
    pub fn vertices_ptr(&self) -> *const f32 {
        self.buffer.as_ptr()
    }

    /// Queued text commands for this frame.
    pub fn texts(&self) -> &[TextCommand] {
        &self.texts
    }

    /// Flush indexed geometry to the flat buffer as a triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Tessellate and fill a polygon.
    ///
    /// The polygon is closed automatically. Supports convex and concave shapes.
    pub fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }

        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.close();
        let path = builder.build();

        self.fill_path(&path, color);
    }

    /// Tessellate and fill a rectangle.
    pub fn fill_rect(&mut self, pos: Vec2, width: f32, height: f32, color: Color) {
        let points = [
            pos,
            Vec2::new(pos.x + width, pos.y),
            Vec2::new(pos.x + width, pos.y + height),
            Vec2::new(pos.x, pos.y + height),
        ];
        self.fill_polygon(&points, color);
    }

    /// Tessellate and fill a rectangle with one radius on all corners.
    pub fn fill_round_rect(&mut self, pos: Vec2, width: f32, height: f32, radius: f32, color: Color) {
        self.fill_round_rect_corners(pos, width, height, [radius; 4], color);
    }

    /// Tessellate and fill a rectangle with per-corner radii
    /// (top-left, top-right, bottom-left, bottom-right).
    pub fn fill_round_rect_corners(
        &mut self,
        pos: Vec2,
        width: f32,
        height: f32,
        radii: [f32; 4],
        color: Color,
    ) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.add_rounded_rectangle(
            &Box2D::new(point(pos.x, pos.y), point(pos.x + width, pos.y + height)),
            &BorderRadii {
                top_left: radii[0],
                top_right: radii[1],
                bottom_left: radii[2],
                bottom_right: radii[3],
            },
            Winding::Positive,
        );
        let path = builder.build();

        self.fill_path(&path, color);
    }

    /// Tessellate and fill a circle.
    ///
    /// The circle is approximated using lyon's default tolerance.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        if radius <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.add_circle(point(center.x, center.y), radius, Winding::Positive);
        let path = builder.build();

        self.fill_path(&path, color);
    }

    /// Tessellate and fill an ellipse.
    pub fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.add_ellipse(
            point(center.x, center.y),
            lyon::math::vector(radii.x, radii.y),
            lyon::math::Angle::radians(0.0),
            Winding::Positive,
        );
        let path = builder.build();

        self.fill_path(&path, color);
    }

    /// Fill a rectangle with a vertical color gradient (`top` along the top
    /// edge blending to `bottom` along the bottom edge). Emitted directly as
    /// two triangles with per-vertex colors — no tessellation involved.
    pub fn fill_vertical_gradient(
        &mut self,
        pos: Vec2,
        width: f32,
        height: f32,
        top: Color,
        bottom: Color,
    ) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        let (x0, y0) = (pos.x, pos.y);
        let (x1, y1) = (pos.x + width, pos.y + height);
        let t = [top.r, top.g, top.b, top.a];
        let b = [bottom.r, bottom.g, bottom.b, bottom.a];

        // Triangle 1: top-left, top-right, bottom-right.
        self.buffer.extend_from_slice(&[x0, y0, t[0], t[1], t[2], t[3]]);
        self.buffer.extend_from_slice(&[x1, y0, t[0], t[1], t[2], t[3]]);
        self.buffer.extend_from_slice(&[x1, y1, b[0], b[1], b[2], b[3]]);
        // Triangle 2: top-left, bottom-right, bottom-left.
        self.buffer.extend_from_slice(&[x0, y0, t[0], t[1], t[2], t[3]]);
        self.buffer.extend_from_slice(&[x1, y1, b[0], b[1], b[2], b[3]]);
        self.buffer.extend_from_slice(&[x0, y1, b[0], b[1], b[2], b[3]]);
    }

    /// Tessellate an arbitrary filled lyon Path.
    pub fn fill_path(&mut self, path: &Path, color: Color) {
        let result = self.fill_tess.tessellate_path(
            path,
            &FillOptions::tolerance(0.5),
            &mut BuffersBuilder::new(&mut self.geometry, FillVertexCtor { color }),
        );

        if result.is_ok() {
            self.flush_geometry();
        }
    }

    /// Tessellate a stroked polyline (open path).
    pub fn stroke_polyline(&mut self, points: &[Vec2], width: f32, color: Color) {
        if points.len() < 2 {
            return;
        }

        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.end(false); // open path

        let path = builder.build();
        self.stroke_path(&path, width, color);
    }

    /// Tessellate a stroked closed polygon.
    pub fn stroke_polygon(&mut self, points: &[Vec2], width: f32, color: Color) {
        if points.len() < 3 {
            return;
        }

        let mut builder = Path::builder();
        builder.begin(point(points[0].x, points[0].y));
        for p in &points[1..] {
            builder.line_to(point(p.x, p.y));
        }
        builder.close();

        let path = builder.build();
        self.stroke_path(&path, width, color);
    }

    /// Tessellate a stroked rectangle with rounded corners.
    pub fn stroke_round_rect(
        &mut self,
        pos: Vec2,
        width: f32,
        height: f32,
        radius: f32,
        line_width: f32,
        color: Color,
    ) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        let mut builder = Path::builder();
        builder.add_rounded_rectangle(
            &Box2D::new(point(pos.x, pos.y), point(pos.x + width, pos.y + height)),
            &BorderRadii::new(radius),
            Winding::Positive,
        );
        let path = builder.build();

        self.stroke_path(&path, line_width, color);
    }

    /// Tessellate an arbitrary stroked lyon Path.
    pub fn stroke_path(&mut self, path: &Path, width: f32, color: Color) {
        let result = self.stroke_tess.tessellate_path(
            path,
            &StrokeOptions::tolerance(0.5).with_line_width(width),
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );

        if result.is_ok() {
            self.flush_geometry();
        }
    }

    /// Queue a text run for the host to rasterize.
    pub fn text(
        &mut self,
        text: impl Into<String>,
        pos: Vec2,
        size: f32,
        align: TextAlign,
        color: Color,
    ) {
        self.texts.push(TextCommand {
            text: text.into(),
            x: pos.x,
            y: pos.y,
            size,
            align,
            color,
        });
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn shape_vertex_is_24_bytes() {
        assert_eq!(size_of::<ShapeVertex>(), 24);
        assert_eq!(ShapeVertex::FLOATS, 6);
        assert_eq!(ShapeVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn color_constructors() {
        let c = Color::rgb8(255, 128, 0);
        assert!((c.r - 1.0).abs() < 0.01);
        assert!((c.g - 0.5).abs() < 0.01);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 1.0);

        let faded = c.with_alpha(0.25);
        assert_eq!(faded.a, 0.25);
        assert_eq!(faded.r, c.r);
    }

    #[test]
    fn fill_rect_produces_two_triangles() {
        let mut canvas = Canvas::new();
        canvas.fill_rect(Vec2::ZERO, 100.0, 50.0, Color::WHITE);
        assert_eq!(canvas.vertex_count(), 6);
    }

    #[test]
    fn fill_polygon_triangle() {
        let mut canvas = Canvas::new();
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(50.0, 100.0),
        ];
        canvas.fill_polygon(&points, Color::BLACK);
        assert_eq!(canvas.vertex_count(), 3);
    }

    #[test]
    fn round_rect_and_circle_produce_vertices() {
        let mut canvas = Canvas::new();
        canvas.fill_round_rect(Vec2::ZERO, 80.0, 40.0, 8.0, Color::WHITE);
        assert!(canvas.vertex_count() > 0);

        let before = canvas.vertex_count();
        canvas.fill_circle(Vec2::new(50.0, 50.0), 25.0, Color::WHITE);
        assert!(canvas.vertex_count() > before);
    }

    #[test]
    fn gradient_quad_interpolates_per_vertex() {
        let mut canvas = Canvas::new();
        let top = Color::rgb(1.0, 0.0, 0.0);
        let bottom = Color::rgb(0.0, 0.0, 1.0);
        canvas.fill_vertical_gradient(Vec2::ZERO, 10.0, 10.0, top, bottom);
        assert_eq!(canvas.vertex_count(), 6);

        let verts = canvas.vertices();
        // First vertex is a top corner: red channel 1, blue 0.
        assert_eq!(verts[2], 1.0);
        assert_eq!(verts[4], 0.0);
        // Third vertex is a bottom corner: red 0, blue 1.
        let v2 = &verts[2 * ShapeVertex::FLOATS..];
        assert_eq!(v2[2], 0.0);
        assert_eq!(v2[4], 1.0);
    }

    #[test]
    fn degenerate_inputs_produce_nothing() {
        let mut canvas = Canvas::new();
        canvas.fill_polygon(&[], Color::WHITE);
        canvas.fill_polygon(&[Vec2::ZERO, Vec2::ONE], Color::WHITE);
        canvas.fill_circle(Vec2::ZERO, 0.0, Color::WHITE);
        canvas.fill_ellipse(Vec2::ZERO, Vec2::new(0.0, 5.0), Color::WHITE);
        canvas.fill_vertical_gradient(Vec2::ZERO, 0.0, 10.0, Color::WHITE, Color::BLACK);
        canvas.stroke_polyline(&[Vec2::ZERO], 2.0, Color::WHITE);
        assert_eq!(canvas.vertex_count(), 0);
    }

    #[test]
    fn stroke_polyline_produces_vertices() {
        let mut canvas = Canvas::new();
        let points = [Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0)];
        canvas.stroke_polyline(&points, 5.0, Color::WHITE);
        assert!(canvas.vertex_count() > 0);
    }

    #[test]
    fn text_goes_to_side_channel() {
        let mut canvas = Canvas::new();
        canvas.text("hello", Vec2::new(10.0, 20.0), 16.0, TextAlign::Center, Color::BLACK);
        assert_eq!(canvas.vertex_count(), 0);
        assert_eq!(canvas.texts().len(), 1);
        assert_eq!(canvas.texts()[0].text, "hello");
        assert_eq!(canvas.texts()[0].align, TextAlign::Center);
    }

    #[test]
    fn clear_resets_both_channels() {
        let mut canvas = Canvas::new();
        canvas.fill_rect(Vec2::ZERO, 10.0, 10.0, Color::WHITE);
        canvas.text("x", Vec2::ZERO, 12.0, TextAlign::Left, Color::BLACK);
        canvas.clear();
        assert_eq!(canvas.vertex_count(), 0);
        assert!(canvas.texts().is_empty());
    }
}
