//! Immutable transformation builder and URL serializer.
//!
//! An [`Image`] is a snapshot of "source asset + requested transformations".
//! Every transformation borrows the snapshot and returns a new one, so a
//! base image can be shared and branched freely.
//!
//! # URL grammar
//!
//! ```text
//! {source}                                     no transformation
//! {source}/m[/{crop}][/fit-in][/{w}x{h}][/filters:{k}({v})...]
//! ```
//!
//! `{crop}` is `leftxtop:rightxbottom`. `{w}` and `{h}` carry a leading `-`
//! when flipped on that axis. Filters are sorted by name.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use crate::error::ImageError;
use crate::params::{
    Angle, Blur, Brightness, CropRect, Fill, FocalPoint, Format, Quality, RoundedCorner,
};
use crate::source;

/// Source asset plus requested transformations.
///
/// ```
/// use imgservice::{Format, Image, Quality};
///
/// let image = Image::new("https://a.storyblok.com/f/287488/1400x900/2fc896c892/image.jpg")?
///     .resize(700, 0)?
///     .quality(Quality::new(80)?)
///     .format(Format::Webp);
///
/// assert_eq!(
///     image.to_url(),
///     "https://a.storyblok.com/f/287488/1400x900/2fc896c892/image.jpg/m/700x450/filters:format(webp):quality(80)"
/// );
/// assert_eq!(image.extension(), "webp");
/// # Ok::<(), imgservice::ImageError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    source_url: String,
    original_width: u32,
    original_height: u32,
    width: Option<u32>,
    height: Option<u32>,
    fit_in: bool,
    crop: Option<CropRect>,
    flip_x: bool,
    flip_y: bool,
    extension: String,
    name: String,
    /// Filter name → encoded argument. `BTreeMap` iteration is the output order.
    filters: BTreeMap<&'static str, String>,
}

impl Image {
    /// Parse original dimensions and file name from `url`.
    ///
    /// Fails with [`ImageError::InvalidSourceUrl`] when the URL has no
    /// `/{width}x{height}/` segment.
    #[tracing::instrument(level = "debug")]
    pub fn new(url: &str) -> Result<Self, ImageError> {
        let Some(parts) = source::parse(url) else {
            tracing::debug!("source URL has no dimensions segment");
            return Err(ImageError::invalid_source(url));
        };
        tracing::debug!(
            width = parts.width,
            height = parts.height,
            "parsed source dimensions"
        );

        Ok(Self {
            source_url: String::from(url),
            original_width: parts.width,
            original_height: parts.height,
            width: None,
            height: None,
            fit_in: false,
            crop: None,
            flip_x: false,
            flip_y: false,
            extension: String::from(parts.extension),
            name: String::from(parts.name),
            filters: BTreeMap::new(),
        })
    }

    // ---- Transformations ----

    /// Blur. A zero-radius blur adds nothing.
    pub fn blur(&self, blur: Blur) -> Self {
        if blur.is_none() {
            return self.clone();
        }
        self.with_filter("blur", blur)
    }

    pub fn quality(&self, quality: Quality) -> Self {
        self.with_filter("quality", quality)
    }

    pub fn brightness(&self, brightness: Brightness) -> Self {
        self.with_filter("brightness", brightness)
    }

    /// Crop to `left, top, right, bottom`.
    ///
    /// `right` and `bottom` default to the original width and height. A
    /// rectangle covering the whole image clears any previous crop.
    pub fn crop(&self, left: u32, top: u32, right: Option<u32>, bottom: Option<u32>) -> Self {
        let rect = CropRect::new(
            left,
            top,
            right.unwrap_or(self.original_width),
            bottom.unwrap_or(self.original_height),
        );
        let crop = (!rect.is_full(self.original_width, self.original_height)).then_some(rect);
        self.with(|image| image.crop = crop)
    }

    /// Scale to fit inside `width` x `height` without cropping.
    ///
    /// Both bounds must lie within the original dimensions.
    pub fn fit_in(&self, width: u32, height: u32) -> Result<Self, ImageError> {
        if width > self.original_width {
            return Err(ImageError::invalid(
                "width",
                alloc::format!("between 0 and {}", self.original_width),
                width,
            ));
        }
        if height > self.original_height {
            return Err(ImageError::invalid(
                "height",
                alloc::format!("between 0 and {}", self.original_height),
                height,
            ));
        }

        Ok(self.with(|image| {
            image.fit_in = true;
            image.width = Some(width);
            image.height = Some(height);
        }))
    }

    /// Background for the area `fit_in` leaves uncovered.
    pub fn fill(&self, fill: impl Into<Fill>) -> Self {
        self.with_filter("fill", fill.into())
    }

    /// Convert to `format`. The extension follows; the name does not change.
    pub fn format(&self, format: Format) -> Self {
        let mut image = self.with_filter("format", format);
        image.extension = String::from(format.as_str());
        image
    }

    /// Mirror horizontally.
    pub fn flip_x(&self) -> Self {
        self.with(|image| image.flip_x = true)
    }

    /// Mirror vertically.
    pub fn flip_y(&self) -> Self {
        self.with(|image| image.flip_y = true)
    }

    pub fn focal_point(&self, focal_point: FocalPoint) -> Self {
        self.with_filter("focal", focal_point)
    }

    pub fn grayscale(&self) -> Self {
        self.with_filter("grayscale", "")
    }

    /// Never enlarge beyond the original size.
    pub fn no_upscale(&self) -> Self {
        self.with_filter("no_upscale", "")
    }

    /// Resize to `width` x `height`. Pass 0 for one side to derive it from
    /// the original aspect ratio (truncated, not rounded).
    pub fn resize(&self, width: u32, height: u32) -> Result<Self, ImageError> {
        let (width, height) = match (width, height) {
            (0, 0) => {
                return Err(ImageError::invalid(
                    "height",
                    "greater than 0 when width is 0",
                    height,
                ));
            }
            (0, h) => (
                proportional("width", self.original_width, h, self.original_height)?,
                h,
            ),
            (w, 0) => (
                w,
                proportional("height", self.original_height, w, self.original_width)?,
            ),
            (w, h) => (w, h),
        };
        tracing::trace!(width, height, "resize");

        Ok(self.with(|image| {
            image.width = Some(width);
            image.height = Some(height);
        }))
    }

    pub fn rotate(&self, angle: Angle) -> Self {
        self.with_filter("rotate", angle)
    }

    pub fn rounded_corners(&self, corner: RoundedCorner) -> Self {
        self.with_filter("round_corner", corner)
    }

    // ---- Accessors ----

    /// Output width: the explicit override or the original width.
    pub fn width(&self) -> u32 {
        self.width.unwrap_or(self.original_width)
    }

    /// Output height: the explicit override or the original height.
    pub fn height(&self) -> u32 {
        self.height.unwrap_or(self.original_height)
    }

    pub fn original_width(&self) -> u32 {
        self.original_width
    }

    pub fn original_height(&self) -> u32 {
        self.original_height
    }

    /// File extension, replaced by [`format`](Self::format).
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// File name without extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn crop_rect(&self) -> Option<CropRect> {
        self.crop
    }

    pub fn is_fit_in(&self) -> bool {
        self.fit_in
    }

    pub fn is_flipped_x(&self) -> bool {
        self.flip_x
    }

    pub fn is_flipped_y(&self) -> bool {
        self.flip_y
    }

    /// `(name, argument)` pairs in output order.
    pub fn filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// True when serializing yields the source URL unchanged.
    pub fn is_identity(&self) -> bool {
        self.width.is_none()
            && self.height.is_none()
            && !self.fit_in
            && self.crop.is_none()
            && self.filters.is_empty()
            && !self.flip_x
            && !self.flip_y
    }

    /// Serialize to the image-service URL.
    pub fn to_url(&self) -> String {
        let url = self.to_string();
        tracing::trace!(url = %url, "serialized");
        url
    }

    // ---- Internal ----

    fn with(&self, apply: impl FnOnce(&mut Self)) -> Self {
        let mut image = self.clone();
        apply(&mut image);
        image
    }

    fn with_filter(&self, name: &'static str, argument: impl ToString) -> Self {
        let argument = argument.to_string();
        self.with(|image| {
            image.filters.insert(name, argument);
        })
    }

    fn has_dimensions_segment(&self) -> bool {
        self.width.is_some() || self.height.is_some() || self.flip_x || self.flip_y
    }
}

/// `original_other * given / original_given`, truncated. Exact in `u64`;
/// fails when the derived side does not fit `u32`.
fn proportional(
    name: &'static str,
    original_other: u32,
    given: u32,
    original_given: u32,
) -> Result<u32, ImageError> {
    let derived = u64::from(original_other) * u64::from(given) / u64::from(original_given);
    u32::try_from(derived).map_err(|_| {
        ImageError::invalid(name, alloc::format!("at most {}", u32::MAX), derived)
    })
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source_url)?;
        if self.is_identity() {
            return Ok(());
        }

        f.write_str("/m")?;

        if let Some(crop) = &self.crop {
            write!(f, "/{crop}")?;
        }

        if self.has_dimensions_segment() {
            if self.fit_in {
                f.write_str("/fit-in")?;
            }
            let sx = if self.flip_x { "-" } else { "" };
            let sy = if self.flip_y { "-" } else { "" };
            write!(f, "/{sx}{}x{sy}{}", self.width(), self.height())?;
        }

        if !self.filters.is_empty() {
            f.write_str("/filters")?;
            for (name, argument) in &self.filters {
                write!(f, ":{name}({argument})")?;
            }
        }

        Ok(())
    }
}

impl FromStr for Image {
    type Err = ImageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for Image {
    type Error = ImageError;

    fn try_from(url: &str) -> Result<Self, Self::Error> {
        Self::new(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{HexCode, Transparent};
    use alloc::format;

    const URL: &str = "https://a.storyblok.com/f/287488/1400x900/2fc896c892/image.jpg";

    fn image() -> Image {
        Image::new(URL).unwrap()
    }

    fn url(suffix: &str) -> String {
        format!("{URL}{suffix}")
    }

    #[test]
    fn untouched_image_is_source_url() {
        assert_eq!(image().to_url(), URL);
        assert_eq!(image().to_string(), URL);
        assert!(image().is_identity());
    }

    #[test]
    fn rejects_url_without_dimensions() {
        let err = Image::new("https://example.com/image.jpg").unwrap_err();
        assert_eq!(
            err,
            ImageError::InvalidSourceUrl {
                url: "https://example.com/image.jpg".into()
            }
        );
        assert!("https://example.com/image.jpg".parse::<Image>().is_err());
        assert!(Image::try_from("nope").is_err());
    }

    #[test]
    fn reads_source_parts() {
        let image = image();
        assert_eq!(image.width(), 1400);
        assert_eq!(image.height(), 900);
        assert_eq!(image.original_width(), 1400);
        assert_eq!(image.original_height(), 900);
        assert_eq!(image.name(), "image");
        assert_eq!(image.extension(), "jpg");
        assert_eq!(image.source_url(), URL);
    }

    #[test]
    fn blur_filter() {
        let blurred = image().blur(Blur::with_sigma(10, 5).unwrap());
        assert_eq!(blurred.to_url(), url("/m/filters:blur(10, 5)"));
        assert_eq!(
            image().blur(Blur::new(10).unwrap()).to_url(),
            url("/m/filters:blur(10)")
        );
    }

    #[test]
    fn zero_blur_adds_nothing() {
        let image = image().blur(Blur::with_sigma(0, 0).unwrap());
        assert!(image.is_identity());
        assert_eq!(image.to_url(), URL);
    }

    #[test]
    fn zero_blur_keeps_existing_blur() {
        let image = image()
            .blur(Blur::new(3).unwrap())
            .blur(Blur::new(0).unwrap());
        assert_eq!(image.to_url(), url("/m/filters:blur(3)"));
    }

    #[test]
    fn quality_and_brightness_at_bounds() {
        assert_eq!(
            image().quality(Quality::new(0).unwrap()).to_url(),
            url("/m/filters:quality(0)")
        );
        assert_eq!(
            image().brightness(Brightness::new(0).unwrap()).to_url(),
            url("/m/filters:brightness(0)")
        );
        assert_eq!(
            image().brightness(Brightness::new(-100).unwrap()).to_url(),
            url("/m/filters:brightness(-100)")
        );
    }

    #[test]
    fn crop_rectangle() {
        let image = image().crop(100, 50, Some(800), Some(600));
        assert_eq!(image.to_url(), url("/m/100x50:800x600"));
        assert_eq!(image.crop_rect(), Some(CropRect::new(100, 50, 800, 600)));
        // Crop alone emits no dimensions segment.
        assert_eq!(
            image.to_url().strip_prefix(URL),
            Some("/m/100x50:800x600")
        );
    }

    #[test]
    fn crop_defaults_to_original_edges() {
        assert_eq!(
            image().crop(10, 20, None, None).to_url(),
            url("/m/10x20:1400x900")
        );
        assert_eq!(
            image().crop(0, 0, Some(700), None).to_url(),
            url("/m/0x0:700x900")
        );
    }

    #[test]
    fn full_crop_is_no_crop() {
        assert_eq!(image().crop(0, 0, None, None).to_url(), URL);
        assert_eq!(image().crop(0, 0, Some(1400), Some(900)).to_url(), URL);
    }

    #[test]
    fn full_crop_clears_previous_crop() {
        let image = image()
            .crop(10, 10, Some(20), Some(20))
            .crop(0, 0, None, None);
        assert_eq!(image.crop_rect(), None);
        assert_eq!(image.to_url(), URL);
    }

    #[test]
    fn fit_in_within_original() {
        let image = image().fit_in(700, 450).unwrap();
        assert_eq!(image.to_url(), url("/m/fit-in/700x450"));
        assert!(image.is_fit_in());
    }

    #[test]
    fn fit_in_accepts_bounds() {
        assert!(image().fit_in(1400, 900).is_ok());
        assert!(image().fit_in(0, 0).is_ok());
    }

    #[test]
    fn fit_in_beyond_original() {
        let err = image().fit_in(1401, 900).unwrap_err();
        assert_eq!(
            err,
            ImageError::InvalidParameter {
                name: "width",
                expected: "between 0 and 1400".into(),
                value: "1401".into(),
            }
        );
        let err = image().fit_in(700, 901).unwrap_err();
        assert!(matches!(
            err,
            ImageError::InvalidParameter { name: "height", .. }
        ));
    }

    #[test]
    fn fill_hex_and_transparent() {
        let hex = HexCode::new("#CCCCCC").unwrap();
        assert_eq!(
            image().fit_in(700, 450).unwrap().fill(hex).to_url(),
            url("/m/fit-in/700x450/filters:fill(CCCCCC)")
        );
        assert_eq!(
            image().fill(Transparent).to_url(),
            url("/m/filters:fill(transparent)")
        );
    }

    #[test]
    fn format_sets_filter_and_extension() {
        for format in Format::ALL {
            let image = image().format(format);
            assert_eq!(image.to_url(), url(&format!("/m/filters:format({format})")));
            assert_eq!(image.extension(), format.as_str());
            assert_eq!(image.name(), "image");
        }
    }

    #[test]
    fn flips_sign_dimensions() {
        assert_eq!(image().flip_x().to_url(), url("/m/-1400x900"));
        assert_eq!(image().flip_y().to_url(), url("/m/1400x-900"));
        assert_eq!(image().flip_x().flip_y().to_url(), url("/m/-1400x-900"));
        assert_eq!(
            image().resize(700, 450).unwrap().flip_y().to_url(),
            url("/m/700x-450")
        );
    }

    #[test]
    fn flip_with_fit_in() {
        assert_eq!(
            image().fit_in(700, 450).unwrap().flip_x().to_url(),
            url("/m/fit-in/-700x450")
        );
    }

    #[test]
    fn focal_point_filter() {
        let fp: FocalPoint = "719x153:720x154".parse().unwrap();
        assert_eq!(
            image().focal_point(fp).to_url(),
            url("/m/filters:focal(719x153:720x154)")
        );
    }

    #[test]
    fn empty_argument_filters() {
        assert_eq!(image().grayscale().to_url(), url("/m/filters:grayscale()"));
        assert_eq!(
            image().no_upscale().to_url(),
            url("/m/filters:no_upscale()")
        );
    }

    #[test]
    fn resize_both_dimensions() {
        assert_eq!(
            image().resize(700, 450).unwrap().to_url(),
            url("/m/700x450")
        );
    }

    #[test]
    fn resize_derives_missing_dimension() {
        let by_width = image().resize(700, 0).unwrap();
        assert_eq!((by_width.width(), by_width.height()), (700, 450));
        assert_eq!(by_width.to_url(), url("/m/700x450"));

        let by_height = image().resize(0, 450).unwrap();
        assert_eq!((by_height.width(), by_height.height()), (700, 450));
    }

    #[test]
    fn resize_truncates() {
        // 900 * 333 / 1400 = 214.07
        assert_eq!(image().resize(333, 0).unwrap().height(), 214);
        // 1400 * 1 / 900 = 1.55
        assert_eq!(image().resize(0, 1).unwrap().width(), 1);
        // 900 * 1 / 1400 = 0.64
        assert_eq!(image().resize(1, 0).unwrap().height(), 0);
    }

    #[test]
    fn resize_derivation_is_exact_for_large_values() {
        let image = Image::new("https://h/f/4294967291x4294967279/a/b.png").unwrap();
        // 4294967279 * 4294967294 / 4294967291 = 4294967281.99...
        assert_eq!(image.resize(4294967294, 0).unwrap().height(), 4294967281);
    }

    #[test]
    fn resize_derived_overflow_is_rejected() {
        let image = Image::new("https://h/f/1x2/a/b.png").unwrap();
        let err = image.resize(3_000_000_000, 0).unwrap_err();
        assert_eq!(
            err,
            ImageError::InvalidParameter {
                name: "height",
                expected: format!("at most {}", u32::MAX),
                value: "6000000000".into(),
            }
        );
        assert!(image.resize(0, 4_000_000_000).is_ok());
    }

    #[test]
    fn resize_needs_one_dimension() {
        let err = image().resize(0, 0).unwrap_err();
        assert!(matches!(
            err,
            ImageError::InvalidParameter { name: "height", .. }
        ));
    }

    #[test]
    fn resize_replaces_fit_in_dimensions() {
        let image = image().fit_in(100, 100).unwrap().resize(700, 450).unwrap();
        assert_eq!(image.to_url(), url("/m/fit-in/700x450"));
    }

    #[test]
    fn rotate_filter() {
        for angle in Angle::ALL {
            assert_eq!(
                image().rotate(angle).to_url(),
                url(&format!("/m/filters:rotate({})", angle.degrees()))
            );
        }
    }

    #[test]
    fn rounded_corners_filter() {
        let corner = RoundedCorner::new(20).unwrap().ellipsis(10).unwrap();
        assert_eq!(
            image().rounded_corners(corner).to_url(),
            url("/m/filters:round_corner(20|10,255,255,255,0)")
        );
    }

    #[test]
    fn filters_sorted_by_name() {
        let image = image()
            .rotate(Angle::Deg90)
            .quality(Quality::new(80).unwrap())
            .grayscale()
            .blur(Blur::new(5).unwrap())
            .brightness(Brightness::new(10).unwrap());
        assert_eq!(
            image.to_url(),
            url("/m/filters:blur(5):brightness(10):grayscale():quality(80):rotate(90)")
        );
        let names: alloc::vec::Vec<&str> = image.filters().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            ["blur", "brightness", "grayscale", "quality", "rotate"]
        );
    }

    #[test]
    fn later_filter_replaces_earlier() {
        let image = image()
            .quality(Quality::new(10).unwrap())
            .quality(Quality::new(90).unwrap());
        assert_eq!(image.to_url(), url("/m/filters:quality(90)"));
    }

    #[test]
    fn transformations_leave_receiver_unchanged() {
        let original = image();
        let resized = original.resize(700, 450).unwrap();
        let with_quality = resized.quality(Quality::new(80).unwrap());

        assert_eq!(original.to_url(), URL);
        assert_eq!(resized.to_url(), url("/m/700x450"));
        assert_eq!(with_quality.to_url(), url("/m/700x450/filters:quality(80)"));
    }

    #[test]
    fn format_keeps_original_extension() {
        let original = image();
        let formatted = original.format(Format::Webp);
        assert_eq!(original.extension(), "jpg");
        assert_eq!(formatted.extension(), "webp");
    }

    #[test]
    fn full_chain() {
        let image = Image::new("https://host/f/x/1400x900/y/image.jpg")
            .unwrap()
            .crop(100, 50, Some(800), Some(600))
            .resize(350, 275)
            .unwrap()
            .flip_x()
            .quality(Quality::new(80).unwrap())
            .format(Format::Webp)
            .grayscale();
        assert_eq!(
            image.to_url(),
            "https://host/f/x/1400x900/y/image.jpg/m/100x50:800x600/-350x275/filters:format(webp):grayscale():quality(80)"
        );
        assert_eq!(image.extension(), "webp");
    }

    #[test]
    fn image_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Image>();
    }
}
