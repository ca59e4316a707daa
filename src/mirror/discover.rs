//! Mirrored-site root discovery.
//!
//! wget lays the mirror out under a directory named after the URL's host
//! (plus the URL path, for sub-path mirrors). When that directory is
//! missing the tree is searched for an `index.html` as a fallback. The
//! chosen strategy is part of the result, so callers and tests can assert
//! on why a root was picked instead of trusting a silent guess.

use jwalk::WalkDir;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

use crate::log;

/// Which discovery strategy produced the site root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discovery {
    /// The wget host directory existed at the expected location.
    HostDirectory,
    /// Fallback: the tree was scanned for an `index.html`.
    IndexScan,
}

/// A discovered site root and how it was found.
#[derive(Debug, Clone)]
pub struct SiteRoot {
    pub path: PathBuf,
    pub strategy: Discovery,
}

/// Discovery errors.
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error(
        "no mirrored content found under `{0}`: the mirror step produced no pages (wrong URL, network failure, or a site that blocks mirroring)"
    )]
    NoContent(PathBuf),
}

/// Locate the root of the mirrored site inside the download directory.
pub fn discover_site_root(mirror_dir: &Path, url: &str) -> Result<SiteRoot, MirrorError> {
    if let Some(dir) = host_directory(mirror_dir, url)
        && dir.is_dir()
    {
        return Ok(SiteRoot {
            path: dir,
            strategy: Discovery::HostDirectory,
        });
    }

    // Fallback: any index.html in the tree marks a candidate root
    let mut candidates: Vec<PathBuf> = WalkDir::new(mirror_dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.file_name().to_str() == Some("index.html"))
        .map(|e| e.path())
        .collect();
    candidates.sort();

    let Some(first) = candidates.first() else {
        return Err(MirrorError::NoContent(mirror_dir.to_path_buf()));
    };
    let root = first
        .parent()
        .map_or_else(|| mirror_dir.to_path_buf(), Path::to_path_buf);

    if candidates.len() > 1 {
        log!("mirror"; "{} index.html candidates in the mirror; using `{}`",
            candidates.len(), root.display());
    }

    Ok(SiteRoot {
        path: root,
        strategy: Discovery::IndexScan,
    })
}

/// Expected mirror subdirectory for a URL: `<mirror>/<host>[/<url-path>]`.
fn host_directory(mirror_dir: &Path, url: &str) -> Option<PathBuf> {
    let parsed = Url::parse(url)
        .or_else(|_| Url::parse(&format!("https://{url}")))
        .ok()?;
    let host = parsed.host_str()?;

    let mut dir = mirror_dir.join(host);
    let path = parsed.path().trim_matches('/');
    if !path.is_empty() {
        dir = dir.join(path);
    }
    Some(dir)
}
