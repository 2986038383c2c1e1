/// Absolute pixel position on the panel, origin top-left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Width × height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    pub width:  u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub origin: Point,
    pub size:   Size,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            origin: Point::new(x, y),
            size:   Size::new(width, height),
        }
    }

    /// First column to the right of the rectangle.
    #[must_use]
    pub fn right(&self) -> i32 {
        self.origin.x + self.size.width as i32
    }

    /// First row below the rectangle.
    #[must_use]
    pub fn bottom(&self) -> i32 {
        self.origin.y + self.size.height as i32
    }
}
