//! Colors: hex codes, the `transparent` keyword, fill values, rounded corners.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::error::{ImageError, ensure_non_negative, ensure_range};

/// A hex color: `#RGB`, `RGB`, `#RRGGBB` or `RRGGBB`.
///
/// Surrounding whitespace is trimmed. Case is kept as given; the encoded
/// form drops the leading `#`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HexCode {
    // Stored without '#'.
    digits: String,
}

impl HexCode {
    pub fn new(value: &str) -> Result<Self, ImageError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ImageError::invalid("hex code", "a non-empty string", value));
        }

        // Strip optional leading '#'
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !is_hex(digits) {
            return Err(ImageError::invalid(
                "hex code",
                "a 3 or 6 digit hexadecimal color code",
                value,
            ));
        }

        Ok(Self {
            digits: String::from(digits),
        })
    }

    /// Hex digits without the leading `#`.
    pub fn as_str(&self) -> &str {
        &self.digits
    }
}

fn is_hex(digits: &str) -> bool {
    matches!(digits.len(), 3 | 6) && digits.bytes().all(|b| b.is_ascii_hexdigit())
}

impl FromStr for HexCode {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for HexCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

/// The `transparent` fill keyword.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Transparent;

impl fmt::Display for Transparent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("transparent")
    }
}

/// Background fill for `fit-in` letterboxing: a hex color or transparency.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Fill {
    Hex(HexCode),
    Transparent(Transparent),
}

impl From<HexCode> for Fill {
    fn from(hex: HexCode) -> Self {
        Self::Hex(hex)
    }
}

impl From<Transparent> for Fill {
    fn from(t: Transparent) -> Self {
        Self::Transparent(t)
    }
}

impl fmt::Display for Fill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex(hex) => fmt::Display::fmt(hex, f),
            Self::Transparent(t) => fmt::Display::fmt(t, f),
        }
    }
}

/// Rounded corners with an optional elliptical second radius and a
/// background color for the cut-off area.
///
/// Encodes as `radius[|ellipsis],r,g,b,transparent`, e.g. `20|10,255,255,255,0`.
///
/// ```
/// use imgservice::RoundedCorner;
///
/// let corner = RoundedCorner::new(20)?.ellipsis(10)?.rgb(128, 64, 32)?;
/// assert_eq!(corner.to_string(), "20|10,128,64,32,0");
/// # Ok::<(), imgservice::ImageError>(())
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RoundedCorner {
    radius: u32,
    ellipsis: Option<u32>,
    red: u8,
    green: u8,
    blue: u8,
    transparent: bool,
}

impl RoundedCorner {
    /// Corner radius with a white, opaque background.
    pub fn new(radius: i32) -> Result<Self, ImageError> {
        Ok(Self {
            radius: ensure_non_negative("radius", radius)?,
            ellipsis: None,
            red: 255,
            green: 255,
            blue: 255,
            transparent: false,
        })
    }

    /// Second radius for elliptical corners.
    pub fn ellipsis(self, ellipsis: i32) -> Result<Self, ImageError> {
        Ok(Self {
            ellipsis: Some(ensure_non_negative("ellipsis", ellipsis)?),
            ..self
        })
    }

    /// Background color, each channel in `0..=255`.
    pub fn rgb(self, red: i32, green: i32, blue: i32) -> Result<Self, ImageError> {
        Ok(Self {
            red: ensure_range("red", red, 0, 255)? as u8,
            green: ensure_range("green", green, 0, 255)? as u8,
            blue: ensure_range("blue", blue, 0, 255)? as u8,
            ..self
        })
    }

    /// Make the cut-off area transparent instead of colored.
    pub fn transparent(self, transparent: bool) -> Self {
        Self {
            transparent,
            ..self
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn ellipsis_radius(&self) -> Option<u32> {
        self.ellipsis
    }

    pub fn color(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }
}

impl fmt::Display for RoundedCorner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ellipsis {
            Some(e) => write!(f, "{}|{}", self.radius, e)?,
            None => write!(f, "{}", self.radius)?,
        }
        write!(
            f,
            ",{},{},{},{}",
            self.red,
            self.green,
            self.blue,
            u8::from(self.transparent)
        )
    }
}
