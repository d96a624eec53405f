//! Scene widget for ratatui
//!
//! Rasterizes recorded draw commands into half-block cells: every
//! terminal cell shows two vertically stacked pixels, the top one as the
//! foreground of `▀` and the bottom one as its background. Text and item
//! glyphs are overlaid afterwards.

use glam::Vec2;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::geometry::ScreenRect;
use crate::render::{DrawCommand, Rgb};

const UPPER_HALF: &str = "▀";
const GLYPH_COLOR: Color = Color::Rgb(0, 0, 0);

fn to_color((r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

/// Pixel buffer at half-block resolution
struct Raster {
    width: usize,
    height: usize,
    /// Viewport pixels per raster pixel
    scale: Vec2,
    pixels: Vec<Color>,
}

impl Raster {
    fn new(area: Rect, viewport: Vec2) -> Self {
        let width = area.width as usize;
        let height = area.height as usize * 2;
        Self {
            width,
            height,
            scale: Vec2::new(viewport.x / width.max(1) as f32, viewport.y / height.max(1) as f32),
            pixels: vec![Color::Reset; width * height],
        }
    }

    /// Raster pixel range touched by a viewport span, clipped to `limit`
    fn span(start: f32, end: f32, scale: f32, limit: usize) -> std::ops::Range<usize> {
        let first = (start / scale).floor().max(0.0) as usize;
        let last = ((end / scale).ceil().max(0.0) as usize).min(limit);
        first.min(last)..last
    }

    fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn fill_rect(&mut self, rect: ScreenRect, color: Color) {
        if rect.w <= 0.0 || rect.h <= 0.0 {
            return;
        }
        let xs = Self::span(rect.x, rect.x + rect.w, self.scale.x, self.width);
        let ys = Self::span(rect.y, rect.y + rect.h, self.scale.y, self.height);
        for y in ys {
            let row = y * self.width;
            self.pixels[row + xs.start..row + xs.end].fill(color);
        }
    }

    fn stroke_rect(&mut self, rect: ScreenRect, width: f32, color: Color) {
        let w = width.min(rect.w / 2.0).min(rect.h / 2.0);
        self.fill_rect(ScreenRect::new(rect.x, rect.y, rect.w, w), color);
        self.fill_rect(ScreenRect::new(rect.x, rect.y + rect.h - w, rect.w, w), color);
        self.fill_rect(ScreenRect::new(rect.x, rect.y, w, rect.h), color);
        self.fill_rect(ScreenRect::new(rect.x + rect.w - w, rect.y, w, rect.h), color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let xs = Self::span(center.x - radius, center.x + radius, self.scale.x, self.width);
        let ys = Self::span(center.y - radius, center.y + radius, self.scale.y, self.height);
        let mut painted = false;
        for y in ys.clone() {
            for x in xs.clone() {
                let pixel_center = (Vec2::new(x as f32, y as f32) + 0.5) * self.scale;
                if pixel_center.distance_squared(center) <= radius * radius {
                    self.pixels[y * self.width + x] = color;
                    painted = true;
                }
            }
        }
        // Circles smaller than a raster pixel still show up
        if !painted && !xs.is_empty() && !ys.is_empty() {
            let x = ((center.x / self.scale.x) as usize).clamp(xs.start, xs.end - 1);
            let y = ((center.y / self.scale.y) as usize).clamp(ys.start, ys.end - 1);
            self.pixels[y * self.width + x] = color;
        }
    }

    fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[y * self.width + x]
    }
}

/// Text placed on top of the raster, in cell coordinates
struct Overlay {
    column: u16,
    row: u16,
    text: String,
    style: Style,
}

/// Widget drawing a recorded frame
pub struct SceneWidget<'a> {
    commands: &'a [DrawCommand],
    viewport: Vec2,
}

impl<'a> SceneWidget<'a> {
    pub fn new(commands: &'a [DrawCommand], viewport: Vec2) -> Self {
        Self { commands, viewport }
    }

    fn cell_of(&self, pos: Vec2, area: Rect) -> Option<(u16, u16)> {
        if pos.x < 0.0 || pos.y < 0.0 || pos.x >= self.viewport.x || pos.y >= self.viewport.y {
            return None;
        }
        let column = (pos.x * area.width as f32 / self.viewport.x) as u16;
        let row = (pos.y * area.height as f32 / self.viewport.y) as u16;
        Some((column.min(area.width.saturating_sub(1)), row.min(area.height.saturating_sub(1))))
    }
}

impl<'a> Widget for SceneWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let mut raster = Raster::new(area, self.viewport);
        let mut overlays = Vec::new();

        for command in self.commands {
            match command {
                DrawCommand::Clear(color) => raster.fill(to_color(*color)),
                DrawCommand::FillRect { rect, color } => raster.fill_rect(*rect, to_color(*color)),
                DrawCommand::StrokeRect { rect, width, color } => {
                    raster.stroke_rect(*rect, *width, to_color(*color))
                }
                DrawCommand::FillCircle { center, radius, color } => {
                    raster.fill_circle(*center, *radius, to_color(*color))
                }
                DrawCommand::Blit { image, rect } => {
                    raster.fill_rect(*rect, to_color(image.color));
                    if let Some((column, row)) = self.cell_of(rect.center(), area) {
                        overlays.push(Overlay {
                            column,
                            row,
                            text: image.glyph.to_string(),
                            style: Style::default().fg(GLYPH_COLOR).add_modifier(Modifier::BOLD),
                        });
                    }
                }
                DrawCommand::Text { pos, text, color } => {
                    if let Some((column, row)) = self.cell_of(*pos, area) {
                        overlays.push(Overlay {
                            column,
                            row,
                            text: text.clone(),
                            style: Style::default().fg(to_color(*color)),
                        });
                    }
                }
            }
        }

        for row in 0..area.height {
            for column in 0..area.width {
                let upper = raster.pixel(column as usize, row as usize * 2);
                let lower = raster.pixel(column as usize, row as usize * 2 + 1);
                if let Some(cell) = buf.cell_mut((area.x + column, area.y + row)) {
                    cell.set_symbol(UPPER_HALF).set_fg(upper).set_bg(lower);
                }
            }
        }

        for overlay in overlays {
            let max_width = (area.width - overlay.column) as usize;
            buf.set_stringn(
                area.x + overlay.column,
                area.y + overlay.row,
                &overlay.text,
                max_width,
                overlay.style,
            );
        }
    }
}
