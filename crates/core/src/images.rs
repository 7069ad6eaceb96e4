//! Image path resolution.
//!
//! Catalog images live under the public asset directory at
//! `<collection>/<base>/<base>-01.<jpg|jpeg>` where `<base>` is
//! `<sort>-<rugNumber>-<lengthCm>x<widthCm>`. Resolution returns a path
//! relative to the public directory, or `None` when no candidate exists.
//! It never fails; callers count and log the miss.

use std::collections::HashSet;
use std::path::PathBuf;

/// Default collection directory, relative to the public asset root.
pub const DEFAULT_IMAGE_COLLECTION: &str = "images/nain_trading";

/// Sequence suffix of the primary image of a rug.
pub const PRIMARY_IMAGE_SUFFIX: &str = "-01";

/// Extensions tried, in order of preference.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// Prefix stripped from spreadsheet-supplied paths.
const PUBLIC_PREFIX: &str = "public/";

// ---------------------------------------------------------------------------
// File existence capability
// ---------------------------------------------------------------------------

/// Answers whether a path relative to the public asset root exists.
pub trait FileProbe {
    fn exists(&self, relative_path: &str) -> bool;
}

impl<P: FileProbe + ?Sized> FileProbe for &P {
    fn exists(&self, relative_path: &str) -> bool {
        (**self).exists(relative_path)
    }
}

impl FileProbe for HashSet<String> {
    fn exists(&self, relative_path: &str) -> bool {
        self.contains(relative_path)
    }
}

/// [`FileProbe`] backed by the real filesystem below a root directory.
#[derive(Debug, Clone)]
pub struct PublicDirProbe {
    root: PathBuf,
}

impl PublicDirProbe {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileProbe for PublicDirProbe {
    fn exists(&self, relative_path: &str) -> bool {
        self.root.join(relative_path).exists()
    }
}

// ---------------------------------------------------------------------------
// Base identifier
// ---------------------------------------------------------------------------

/// Build the base identifier `<sort>-<rugNumber>-<lengthCm>x<widthCm>`.
///
/// A trailing `.0`, `.00`, ... on the sort code is dropped. Returns `None`
/// when the sort code or rug number is blank, or either dimension is
/// missing or zero.
pub fn build_image_base(
    sort: Option<&str>,
    rug_number: &str,
    length_cm: Option<i64>,
    width_cm: Option<i64>,
) -> Option<String> {
    let sort = strip_zero_fraction(sort?.trim());
    let rug_number = rug_number.trim();
    let length_cm = length_cm.filter(|v| *v != 0)?;
    let width_cm = width_cm.filter(|v| *v != 0)?;

    if sort.is_empty() || rug_number.is_empty() {
        return None;
    }

    Some(format!("{sort}-{rug_number}-{length_cm}x{width_cm}"))
}

/// `"24860.0"` -> `"24860"`; `"2400"` and `"1.5"` are unchanged.
fn strip_zero_fraction(code: &str) -> &str {
    match code.rsplit_once('.') {
        Some((head, tail)) if !tail.is_empty() && tail.bytes().all(|b| b == b'0') => head,
        _ => code,
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

/// Split `path` into the part before the extension dot and the raw
/// extension of its last segment. A leading dot (hidden file) does not
/// start an extension.
fn split_extension(path: &str) -> Option<(&str, &str)> {
    let segment_start = path.rfind('/').map_or(0, |pos| pos + 1);
    match path[segment_start..].rfind('.') {
        Some(pos) if pos > 0 => {
            let dot = segment_start + pos;
            Some((&path[..dot], &path[dot + 1..]))
        }
        _ => None,
    }
}

/// Lower-cased extension of the last path segment, without the dot.
pub fn extension_of(path: &str) -> Option<String> {
    split_extension(path).map(|(_, ext)| ext.to_lowercase())
}

/// `true` when the path ends in `.jpg` or `.jpeg` (any case).
pub fn is_jpeg_family(path: &str) -> bool {
    matches!(extension_of(path).as_deref(), Some("jpg" | "jpeg"))
}

/// Replace the extension of `path` with `ext`, appending one if absent.
pub fn with_extension(path: &str, ext: &str) -> String {
    let stem = split_extension(path).map_or(path, |(stem, _)| stem);
    format!("{stem}.{ext}")
}

/// Strip leading `.`, `/` and `\` characters and a `public/` prefix.
pub fn clean_provided_path(raw: &str) -> &str {
    let trimmed = raw.trim().trim_start_matches(['.', '/', '\\']);
    trimmed.strip_prefix(PUBLIC_PREFIX).unwrap_or(trimmed)
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Resolves image paths against a [`FileProbe`] for one collection.
#[derive(Debug, Clone)]
pub struct ImageResolver<P> {
    probe: P,
    collection: String,
}

impl<P: FileProbe> ImageResolver<P> {
    pub fn new(probe: P, collection: impl Into<String>) -> Self {
        let collection = collection.into().trim_matches('/').to_string();
        Self { probe, collection }
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// `<collection>/<base>/<file_name>`.
    pub fn path_in_base_dir(&self, base: &str, file_name: &str) -> String {
        format!("{}/{base}/{file_name}", self.collection)
    }

    /// Try `<collection>/<base>/<base>-01.jpg`, then `.jpeg`.
    pub fn resolve_from_base(&self, base: &str) -> Option<String> {
        IMAGE_EXTENSIONS
            .iter()
            .map(|ext| {
                self.path_in_base_dir(base, &format!("{base}{PRIMARY_IMAGE_SUFFIX}.{ext}"))
            })
            .find(|candidate| self.probe.exists(candidate))
    }

    /// Check a spreadsheet-supplied path as given, then with the other
    /// JPEG extension. Does not fall back to the base identifier.
    pub fn resolve_provided(&self, provided: &str) -> Option<String> {
        let candidate = clean_provided_path(provided);
        if candidate.is_empty() {
            return None;
        }
        if self.probe.exists(candidate) {
            return Some(candidate.to_string());
        }
        if !is_jpeg_family(candidate) {
            return None;
        }
        IMAGE_EXTENSIONS
            .iter()
            .map(|ext| with_extension(candidate, ext))
            .find(|swapped| self.probe.exists(swapped))
    }

    /// Full resolution policy: a provided path wins when it resolves,
    /// otherwise the conventional path derived from `base` is tried.
    pub fn resolve(&self, provided: Option<&str>, base: Option<&str>) -> Option<String> {
        provided
            .and_then(|p| self.resolve_provided(p))
            .or_else(|| base.and_then(|b| self.resolve_from_base(b)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
