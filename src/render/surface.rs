//! Drawing surface abstraction
//!
//! Game code draws through `Surface` in screen pixels. `DrawList` records
//! the calls so a frontend can replay them (and tests can inspect them).

use glam::Vec2;

use crate::geometry::ScreenRect;
use crate::items::ImageHandle;

/// RGB color
pub type Rgb = (u8, u8, u8);

/// Something that accepts screen-space draw calls
pub trait Surface {
    /// Fill the whole surface
    fn clear(&mut self, color: Rgb);

    fn fill_rect(&mut self, rect: ScreenRect, color: Rgb);

    /// Outline a rectangle with a border drawn inside its edges
    fn stroke_rect(&mut self, rect: ScreenRect, width: f32, color: Rgb);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb);

    /// Draw an image scaled into `rect`
    fn blit(&mut self, image: &ImageHandle, rect: ScreenRect);

    /// Draw text with its top-left corner at `pos`
    fn text(&mut self, pos: Vec2, text: &str, color: Rgb);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb),
    FillRect { rect: ScreenRect, color: Rgb },
    StrokeRect { rect: ScreenRect, width: f32, color: Rgb },
    FillCircle { center: Vec2, radius: f32, color: Rgb },
    Blit { image: ImageHandle, rect: ScreenRect },
    Text { pos: Vec2, text: String, color: Rgb },
}

/// Surface that records draw calls in order
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self { commands: Vec::new() }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop all recorded commands, keeping the allocation
    pub fn reset(&mut self) {
        self.commands.clear();
    }

    /// Blit commands in draw order
    pub fn blits(&self) -> impl Iterator<Item = (&ImageHandle, ScreenRect)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Blit { image, rect } => Some((image, *rect)),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn clear(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: ScreenRect, color: Rgb) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: ScreenRect, width: f32, color: Rgb) {
        self.commands.push(DrawCommand::StrokeRect { rect, width, color });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn blit(&mut self, image: &ImageHandle, rect: ScreenRect) {
        self.commands.push(DrawCommand::Blit { image: image.clone(), rect });
    }

    fn text(&mut self, pos: Vec2, text: &str, color: Rgb) {
        self.commands.push(DrawCommand::Text { pos, text: text.to_string(), color });
    }
}
