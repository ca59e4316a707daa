//! URL-to-asset-lookup mapping.
//!
//! Turns a relative asset reference from mirrored markup into the Jinja
//! expression Flask resolves at render time.

use crate::classify::is_asset_extension;

/// Map an asset reference to a `url_for('static', ...)` expression.
///
/// Strips leading path separators and normalizes backslashes, then checks
/// the extension (text after the final dot, case-insensitive) against the
/// known static-asset extensions. References with unrecognized extensions
/// (including query-stringed ones like `style.css?v=2`) get no mapping and
/// are left untouched by the caller.
///
/// Pure and idempotent: the produced expression never maps again because
/// `}}` is not an asset extension.
pub fn flask_asset_url(reference: &str) -> Option<String> {
    let relative = reference
        .trim_start_matches(['/', '\\'])
        .replace('\\', "/");

    let (_, ext) = relative.rsplit_once('.')?;
    if !is_asset_extension(ext) {
        return None;
    }

    Some(format!(
        "{{{{ url_for('static', filename='{relative}') }}}}"
    ))
}
