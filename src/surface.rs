//! Drawing Surface
//!
//! Menus never talk to a window directly. They draw through the [`Surface`]
//! trait, which only needs the handful of rectangle primitives the procedural
//! renderer uses. With the `sdl` feature an SDL2 `Canvas<Window>` implements it;
//! [`RecordingSurface`] is a headless implementation that keeps a log of every
//! draw call.

use crate::color::Color;

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width as i32 <= self.x + self.width as i32
            && other.bottom() <= self.bottom()
    }
}

/// Rendering collaborator used by menus and the demo clock
///
/// All operations mirror SDL2's canvas calls and report failures as `String`.
pub trait Surface {
    /// Logical size in pixels (width, height)
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface, blending when `color` is translucent
    fn fill(&mut self, color: Color) -> Result<(), String>;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String>;

    /// Draw a one pixel rectangle outline
    fn draw_rect(&mut self, rect: Rect, color: Color) -> Result<(), String>;
}

/// A single recorded draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOp {
    Fill(Color),
    FillRect(Rect, Color),
    DrawRect(Rect, Color),
}

/// Headless surface that records draw calls instead of rasterizing them
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        RecordingSurface {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Filled rectangles drawn with exactly `color`
    pub fn rects_with_color(&self, color: Color) -> Vec<Rect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect(rect, c) if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Color) -> Result<(), String> {
        self.ops.push(DrawOp::Fill(color));
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String> {
        self.ops.push(DrawOp::FillRect(rect, color));
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) -> Result<(), String> {
        self.ops.push(DrawOp::DrawRect(rect, color));
        Ok(())
    }
}

#[cfg(feature = "sdl")]
mod sdl_canvas {
    use super::{Rect, Surface};
    use crate::color::Color;
    use sdl2::render::{BlendMode, Canvas};
    use sdl2::video::Window;

    impl From<Rect> for sdl2::rect::Rect {
        fn from(rect: Rect) -> Self {
            sdl2::rect::Rect::new(rect.x, rect.y, rect.width, rect.height)
        }
    }

    fn with_blend<F>(canvas: &mut Canvas<Window>, color: Color, draw: F) -> Result<(), String>
    where
        F: FnOnce(&mut Canvas<Window>) -> Result<(), String>,
    {
        if color.is_opaque() {
            canvas.set_draw_color(color);
            return draw(canvas);
        }

        canvas.set_blend_mode(BlendMode::Blend);
        canvas.set_draw_color(color);
        let result = draw(canvas);
        canvas.set_blend_mode(BlendMode::None);
        result
    }

    impl Surface for Canvas<Window> {
        fn size(&self) -> (u32, u32) {
            // Logical size (game coordinates) when one is set, physical otherwise
            match self.logical_size() {
                (0, 0) => self.output_size().unwrap_or((0, 0)),
                size => size,
            }
        }

        fn fill(&mut self, color: Color) -> Result<(), String> {
            with_blend(self, color, |canvas| canvas.fill_rect(None))
        }

        fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), String> {
            with_blend(self, color, |canvas| canvas.fill_rect(sdl2::rect::Rect::from(rect)))
        }

        fn draw_rect(&mut self, rect: Rect, color: Color) -> Result<(), String> {
            with_blend(self, color, |canvas| canvas.draw_rect(sdl2::rect::Rect::from(rect)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface_keeps_call_order() {
        let mut surface = RecordingSurface::new(800, 600);
        surface.fill(Color::BLACK).unwrap();
        surface
            .fill_rect(Rect::new(1, 2, 3, 4), Color::WHITE)
            .unwrap();

        assert_eq!(surface.size(), (800, 600));
        assert_eq!(
            surface.ops(),
            &[
                DrawOp::Fill(Color::BLACK),
                DrawOp::FillRect(Rect::new(1, 2, 3, 4), Color::WHITE),
            ]
        );
        assert_eq!(surface.rects_with_color(Color::WHITE).len(), 1);
    }

    #[test]
    fn test_rect_containment() {
        let outer = Rect::new(0, 0, 100, 50);
        assert!(outer.contains_rect(&Rect::new(10, 10, 20, 20)));
        assert!(!outer.contains_rect(&Rect::new(90, 40, 20, 20)));
        assert_eq!(outer.bottom(), 50);
    }
}
