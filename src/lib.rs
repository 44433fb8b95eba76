//! Compile image transformations into image-service URLs.
//!
//! Pure URL construction: no network and no pixel operations. Works under
//! `no_std` with `alloc`.
//!
//! ```
//! use imgservice::{Format, Image, Quality};
//!
//! let image = Image::new("https://host/f/x/1400x900/y/image.jpg")?
//!     .crop(100, 50, Some(800), Some(600))
//!     .resize(350, 275)?
//!     .flip_x()
//!     .quality(Quality::new(80)?)
//!     .format(Format::Webp)
//!     .grayscale();
//!
//! assert_eq!(
//!     image.to_url(),
//!     "https://host/f/x/1400x900/y/image.jpg/m/100x50:800x600/-350x275/filters:format(webp):grayscale():quality(80)"
//! );
//! # Ok::<(), imgservice::ImageError>(())
//! ```
//!
//! # Modules
//!
//! - [`image`]: The immutable [`Image`] builder and its URL serializer
//! - [`params`]: Validated filter arguments (blur, quality, colors, ...)
//! - [`source`]: Source URL parsing (original dimensions, file name)

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod error;
pub mod image;
pub mod params;
pub mod source;

pub use error::ImageError;
pub use image::Image;
pub use params::{
    Angle, Blur, Brightness, CropRect, Fill, FocalPoint, Format, HexCode, Quality, RoundedCorner,
    Transparent,
};
