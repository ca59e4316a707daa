//! Website mirroring via the external wget tool.

pub mod discover;

pub use discover::{Discovery, MirrorError, SiteRoot, discover_site_root};

use anyhow::{Context, Result};
use std::{fs, path::Path, time::Duration};

use crate::log;
use crate::utils::exec::Cmd;

/// wget flags for a full recursive mirror with page requisites.
const MIRROR_ARGS: &[&str] = &[
    "--mirror",
    "--convert-links",
    "--adjust-extension",
    "--page-requisites",
    "--no-parent",
];

/// Mirror a website into `output_dir` with wget.
///
/// The download directory is reset first so repeated runs are
/// reproducible. A non-zero wget exit is reported but not fatal on its
/// own: `--mirror` runs routinely exit 4/8 after individual requisite
/// failures while the bulk of the site downloaded fine. The hard stop for
/// a truly failed mirror happens at discovery, when no content exists.
pub fn mirror_site(url: &str, output_dir: &Path, timeout: Option<Duration>) -> Result<()> {
    which::which("wget")
        .context("`wget` not found in PATH; install it or pass --mirror-dir")?;

    if output_dir.exists() {
        fs::remove_dir_all(output_dir).with_context(|| {
            format!("failed to reset download directory `{}`", output_dir.display())
        })?;
    }
    fs::create_dir_all(output_dir).with_context(|| {
        format!("failed to create download directory `{}`", output_dir.display())
    })?;

    log!("mirror"; "downloading {url}");
    let output = Cmd::new("wget")
        .args(MIRROR_ARGS)
        .arg(url)
        .arg("-P")
        .arg(output_dir)
        .timeout(timeout)
        .run_unchecked()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log!("mirror"; "wget exited with {} (partial mirror?): {}",
            output.status, tail(&stderr, 3));
    }

    Ok(())
}

/// Last `n` non-empty lines of command output, joined for display.
fn tail(text: &str, n: usize) -> String {
    let lines: Vec<_> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join(" | ")
}
