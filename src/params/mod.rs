//! Validated filter arguments.
//!
//! Every type checks its range when constructed, so an instance always
//! holds a legal value. [`Display`](core::fmt::Display) produces the exact
//! argument text the image service expects inside `filters:name(...)`.

mod adjust;
mod color;
mod format;
mod region;

pub use adjust::{Blur, Brightness, Quality};
pub use color::{Fill, HexCode, RoundedCorner, Transparent};
pub use format::{Angle, Format};
pub use region::{CropRect, FocalPoint};
