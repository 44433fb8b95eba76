//! Source URL parsing: original dimensions and file name parts.
//!
//! Asset URLs embed their pixel size as a path segment, e.g.
//! `https://a.storyblok.com/f/287488/1400x900/2fc896c892/image.jpg`.
//! Minimal path splitting without external dependencies.

/// Parts of a source URL the builder needs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SourceParts<'a> {
    /// Original width in pixels. Always > 0.
    pub width: u32,
    /// Original height in pixels. Always > 0.
    pub height: u32,
    /// File name without extension.
    pub name: &'a str,
    /// Text after the last `.` of the file name, or empty.
    pub extension: &'a str,
}

/// Parse a source URL.
///
/// Returns `None` when no `/{digits}x{digits}/` segment with two positive
/// values is present. The first such segment wins.
pub fn parse(url: &str) -> Option<SourceParts<'_>> {
    let (width, height) = find_dimensions(url)?;
    let (name, extension) = split_file_name(file_name(url));
    Some(SourceParts {
        width,
        height,
        name,
        extension,
    })
}

/// Find the first segment bounded by `/` on both sides that reads `WxH`.
fn find_dimensions(url: &str) -> Option<(u32, u32)> {
    // The final component has no trailing '/', the first no leading one.
    let (head, _) = url.rsplit_once('/')?;
    head.split('/').skip(1).find_map(parse_dimension_segment)
}

/// `"1400x900"` → `(1400, 900)`. Both sides must be non-empty ASCII digits
/// and positive.
fn parse_dimension_segment(segment: &str) -> Option<(u32, u32)> {
    let (w, h) = segment.split_once('x')?;
    let w = parse_digits(w)?;
    let h = parse_digits(h)?;
    (w > 0 && h > 0).then_some((w, h))
}

/// Strict unsigned decimal: no sign, no whitespace, fits `u32`.
pub(crate) fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Final path component.
fn file_name(url: &str) -> &str {
    match url.rsplit_once('/') {
        Some((_, last)) => last,
        None => url,
    }
}

/// `"image.jpg"` → `("image", "jpg")`, `"README"` → `("README", "")`.
fn split_file_name(file: &str) -> (&str, &str) {
    match file.rsplit_once('.') {
        Some((name, ext)) => (name, ext),
        None => (file, ""),
    }
}
