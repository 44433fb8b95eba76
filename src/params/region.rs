//! Rectangles in source pixel coordinates: focal points and crop regions.

use core::fmt;
use core::str::FromStr;

use crate::error::{ImageError, ensure_non_negative};
use crate::source::parse_digits;

/// Region of interest that biases smart cropping, as two corners.
///
/// Encoded as `x1xy1:x2xy2`, e.g. `719x153:720x154`. [`FromStr`] accepts
/// exactly that form, so parsing and encoding round-trip.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FocalPoint {
    x1: u32,
    y1: u32,
    x2: u32,
    y2: u32,
}

impl FocalPoint {
    /// All coordinates non-negative, `x2 >= x1`, `y2 >= y1`.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Result<Self, ImageError> {
        let x1 = ensure_non_negative("x1", x1)?;
        let y1 = ensure_non_negative("y1", y1)?;
        let x2 = ensure_non_negative("x2", x2)?;
        let y2 = ensure_non_negative("y2", y2)?;
        Self::from_corners(x1, y1, x2, y2)
    }

    fn from_corners(x1: u32, y1: u32, x2: u32, y2: u32) -> Result<Self, ImageError> {
        if x2 < x1 {
            return Err(ImageError::invalid(
                "x2",
                alloc::format!("greater than or equal to x1 ({x1})"),
                x2,
            ));
        }
        if y2 < y1 {
            return Err(ImageError::invalid(
                "y2",
                alloc::format!("greater than or equal to y1 ({y1})"),
                y2,
            ));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Top-left corner.
    pub fn start(&self) -> (u32, u32) {
        (self.x1, self.y1)
    }

    /// Bottom-right corner.
    pub fn end(&self) -> (u32, u32) {
        (self.x2, self.y2)
    }
}

impl FromStr for FocalPoint {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let [x1, y1, x2, y2] = parse_rect(s).ok_or_else(|| {
            ImageError::invalid(
                "focal point",
                "in format \"x1xy1:x2xy2\" (e.g. \"719x153:720x154\")",
                s,
            )
        })?;
        Self::from_corners(x1, y1, x2, y2)
    }
}

/// `"1x2:3x4"` → `[1, 2, 3, 4]`. No whitespace, signs, or extra parts.
fn parse_rect(s: &str) -> Option<[u32; 4]> {
    let (first, second) = s.split_once(':')?;
    let (x1, y1) = first.split_once('x')?;
    let (x2, y2) = second.split_once('x')?;
    Some([
        parse_digits(x1)?,
        parse_digits(y1)?,
        parse_digits(x2)?,
        parse_digits(y2)?,
    ])
}

impl fmt::Display for FocalPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}:{}x{}", self.x1, self.y1, self.x2, self.y2)
    }
}

/// Crop region as left/top/right/bottom edges.
///
/// Edges are passed through to the service as given; only the
/// full-image case is special, see [`CropRect::is_full`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CropRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRect {
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Whether this rect covers the full source (no actual crop).
    pub fn is_full(&self, source_w: u32, source_h: u32) -> bool {
        self.left == 0 && self.top == 0 && self.right == source_w && self.bottom == source_h
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}:{}x{}", self.left, self.top, self.right, self.bottom)
    }
}
