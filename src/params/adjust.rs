//! Scalar adjustments: blur, brightness, quality.

use core::fmt;

use crate::error::{ImageError, ensure_range};

/// Gaussian blur with radius and optional sigma, both in `0..=150`.
///
/// A zero radius means "no blur" and encodes to the empty string, which
/// the builder treats as no filter at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Blur {
    radius: u8,
    sigma: u8,
}

impl Blur {
    /// Largest accepted radius and sigma.
    pub const MAX: i32 = 150;

    /// Blur with radius only.
    pub fn new(radius: i32) -> Result<Self, ImageError> {
        Self::with_sigma(radius, 0)
    }

    /// Blur with radius and sigma. A non-zero sigma requires a non-zero radius.
    pub fn with_sigma(radius: i32, sigma: i32) -> Result<Self, ImageError> {
        let radius = ensure_range("radius", radius, 0, Self::MAX)?;
        if radius == 0 && sigma > 0 {
            return Err(ImageError::invalid(
                "sigma",
                "0 when the radius is 0",
                sigma,
            ));
        }
        let sigma = ensure_range("sigma", sigma, 0, Self::MAX)?;
        // Both fit u8 after the range check.
        Ok(Self {
            radius: radius as u8,
            sigma: sigma as u8,
        })
    }

    pub fn radius(&self) -> u8 {
        self.radius
    }

    pub fn sigma(&self) -> u8 {
        self.sigma
    }

    /// True when this blur has no visible effect.
    pub fn is_none(&self) -> bool {
        self.radius == 0
    }
}

impl fmt::Display for Blur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.radius == 0 {
            return Ok(());
        }
        write!(f, "{}", self.radius)?;
        if self.sigma != 0 {
            write!(f, ", {}", self.sigma)?;
        }
        Ok(())
    }
}

/// Brightness offset in `-100..=100`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Brightness(i8);

impl Brightness {
    pub fn new(value: i32) -> Result<Self, ImageError> {
        let value = ensure_range("brightness", value, -100, 100)?;
        Ok(Self(value as i8))
    }

    pub fn value(&self) -> i8 {
        self.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Encoder quality in `0..=100`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: i32) -> Result<Self, ImageError> {
        let value = ensure_range("quality", value, 0, 100)?;
        Ok(Self(value as u8))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
