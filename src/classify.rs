//! File classification for mirrored site trees.
//!
//! Maps a file's extension to the bucket it lands in inside the Flask
//! project: `templates/` for pages, `static/` for assets, dropped for
//! everything else (wget metadata, robots.txt, ...).

use std::path::Path;

/// Destination bucket for a mirrored file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// HTML page, copied under `templates/` and rewritten.
    Page,
    /// Static asset, copied verbatim under `static/`.
    Asset,
    /// Unrecognized extension, not copied.
    Ignored,
}

/// Extensions served as rendered templates.
const PAGE_EXTENSIONS: &[&str] = &["html", "htm"];

/// Extensions served verbatim from `static/`.
const ASSET_EXTENSIONS: &[&str] = &[
    "css", "js", "png", "jpg", "jpeg", "gif", "svg", "woff", "woff2", "ttf", "eot",
];

/// Classify a file by its extension (case-insensitive).
///
/// Pure function: an unrecognized or missing extension is `Ignored`,
/// never an error.
pub fn classify(path: &Path) -> FileKind {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return FileKind::Ignored;
    };
    let ext = ext.to_ascii_lowercase();

    if PAGE_EXTENSIONS.contains(&ext.as_str()) {
        FileKind::Page
    } else if ASSET_EXTENSIONS.contains(&ext.as_str()) {
        FileKind::Asset
    } else {
        FileKind::Ignored
    }
}

/// Check whether an extension (without dot, any case) is a known
/// static-asset extension.
#[inline]
pub fn is_asset_extension(ext: &str) -> bool {
    ASSET_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
}

/// Check whether a file name has a page extension.
#[inline]
pub fn is_page_file(path: &Path) -> bool {
    classify(path) == FileKind::Page
}
