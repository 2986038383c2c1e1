use crate::{
    error::RenderError,
    geometry::{Point, Rect},
    redraw::RedrawMode,
};

/// Ink colour on a 1-bit panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Black,
    White,
}

/// A single draw operation in absolute panel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Filled rectangle.
    Rect { rect: Rect, fill: Fill },
    /// One-pixel line, both endpoints inclusive.
    Line { from: Point, to: Point, fill: Fill },
}

/// Text drawn at `origin` (top-left of the text box).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text:   String,
    pub origin: Point,
    /// Nominal glyph height in pixels.
    pub size:   u32,
}

/// Receives draw calls for the next frame and pushes it to the panel.
///
/// Draw calls only describe the frame; nothing is visible until [`flush`].
/// The caller never reads pixels back.
///
/// [`flush`]: DisplaySink::flush
pub trait DisplaySink: Send {
    fn draw_label(&mut self, label: &Label) -> Result<(), RenderError>;

    fn draw_region(&mut self, primitives: &[Primitive]) -> Result<(), RenderError>;

    fn flush(&mut self, mode: RedrawMode) -> Result<(), RenderError>;
}
