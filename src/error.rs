//! Error type shared by the value types and the [`Image`](crate::Image) builder.

use alloc::string::{String, ToString};

/// Reasons a URL or transformation parameter was rejected.
///
/// Both kinds are contract violations: fix the input, don't retry.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    /// The source URL has no `/{width}x{height}/` path segment.
    #[error("unable to extract dimensions from URL {url:?}")]
    InvalidSourceUrl {
        /// The rejected URL.
        url: String,
    },
    /// A value type or builder argument is outside its valid range.
    #[error("{name} must be {expected}, {value:?} given")]
    InvalidParameter {
        /// Parameter name, e.g. `"radius"`.
        name: &'static str,
        /// Human-readable range or pattern, e.g. `"between 0 and 150"`.
        expected: String,
        /// The offending input.
        value: String,
    },
}

impl ImageError {
    pub(crate) fn invalid_source(url: &str) -> Self {
        Self::InvalidSourceUrl {
            url: url.to_string(),
        }
    }

    pub(crate) fn invalid(
        name: &'static str,
        expected: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self::InvalidParameter {
            name,
            expected: expected.into(),
            value: value.to_string(),
        }
    }
}

/// Check `min <= value <= max`, naming the parameter on failure.
pub(crate) fn ensure_range(
    name: &'static str,
    value: i32,
    min: i32,
    max: i32,
) -> Result<i32, ImageError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ImageError::invalid(
            name,
            alloc::format!("between {min} and {max}"),
            value,
        ))
    }
}

/// Check `value >= 0` and narrow to `u32`.
pub(crate) fn ensure_non_negative(name: &'static str, value: i32) -> Result<u32, ImageError> {
    u32::try_from(value)
        .map_err(|_| ImageError::invalid(name, "greater than or equal to 0", value))
}
