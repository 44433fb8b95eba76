//! Output format and rotation angle: closed sets of literal values.

use core::fmt;
use core::str::FromStr;

use crate::error::ImageError;

/// Output encoding requested from the service.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Format {
    Webp,
    Jpeg,
    Png,
    Avif,
}

impl Format {
    pub const ALL: [Self; 4] = [Self::Webp, Self::Jpeg, Self::Png, Self::Avif];

    /// Tag used both as the filter argument and as the new file extension.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Webp => "webp",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Avif => "avif",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = ImageError;

    /// Case-insensitive tag lookup.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| s.trim().eq_ignore_ascii_case(format.as_str()))
            .ok_or_else(|| ImageError::invalid("format", "one of webp|jpeg|png|avif", s))
    }
}

/// Clockwise rotation in quarter turns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Angle {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Angle {
    pub const ALL: [Self; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    pub fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }
}

impl TryFrom<i32> for Angle {
    type Error = ImageError;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            _ => Err(ImageError::invalid("angle", "one of 0|90|180|270", degrees)),
        }
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}
