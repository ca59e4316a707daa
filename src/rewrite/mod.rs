//! Asset reference rewriting inside page markup.
//!
//! Walks a page's element tree and replaces relative `href`/`src` asset
//! references on `link`, `script` and `img` elements with
//! `{{ url_for('static', ...) }}` expressions. External references and
//! already-templated values are left untouched, which makes the rewrite
//! idempotent.

pub mod asset_url;
pub mod document;

use anyhow::{Context, Result};
use std::{fs, path::Path};

use asset_url::flask_asset_url;
use document::{Document, Node};

/// Element/attribute vocabulary subject to rewriting.
const REWRITE_ATTRS: &[(&str, &str)] = &[("link", "href"), ("script", "src"), ("img", "src")];

/// The reference attribute for a tag, if the tag is in the vocabulary.
fn reference_attr(tag: &str) -> Option<&'static str> {
    REWRITE_ATTRS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, attr)| *attr)
}

/// Rewrite all asset references in a document tree.
///
/// Returns the number of rewritten references.
pub fn rewrite_document(doc: &mut Document) -> usize {
    doc.nodes.iter_mut().map(rewrite_node).sum()
}

fn rewrite_node(node: &mut Node) -> usize {
    let Node::Element(element) = node else {
        return 0;
    };

    let mut rewritten = 0;
    let replacement = reference_attr(&element.tag).and_then(|attr| {
        let value = element.attr(attr)?;
        // http... is an external absolute reference; {{ means the value
        // was already converted on a previous run
        if value.starts_with("http") || value.starts_with("{{") {
            return None;
        }
        flask_asset_url(value).map(|new_value| (attr, new_value))
    });

    if let Some((attr, new_value)) = replacement {
        element.set_attr(attr, &new_value);
        rewritten += 1;
    }

    for child in &mut element.children {
        rewritten += rewrite_node(child);
    }
    rewritten
}

/// Rewrite a page file on disk in place.
///
/// The file is read with lossy UTF-8 decoding so encoding errors in
/// mirrored pages never abort the run. Returns the number of rewritten
/// references.
pub fn rewrite_page(path: &Path) -> Result<usize> {
    let raw = fs::read(path)
        .with_context(|| format!("failed to read page `{}`", path.display()))?;
    let html = String::from_utf8_lossy(&raw);

    let mut doc = document::parse(&html);
    let rewritten = rewrite_document(&mut doc);

    fs::write(path, doc.to_html())
        .with_context(|| format!("failed to write page `{}`", path.display()))?;
    Ok(rewritten)
}
