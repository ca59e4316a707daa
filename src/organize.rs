//! Project organization: mirrored tree → templates/ + static/.
//!
//! The destructive reset of the project directory is isolated in
//! `prepare_project_dirs`, which returns a handle used by every later
//! stage. `organize` itself only classifies, copies and rewrites.

use anyhow::{Context, Result};
use jwalk::WalkDir;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::classify::{FileKind, classify};
use crate::logger::ProgressLine;
use crate::rewrite::rewrite_page;
use crate::{debug, log};

/// Handle to a prepared project directory tree.
#[derive(Debug, Clone)]
pub struct ProjectDirs {
    pub root: PathBuf,
    pub templates: PathBuf,
    pub static_dir: PathBuf,
}

impl ProjectDirs {
    /// Handle over an existing project tree, without resetting anything.
    pub fn existing(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            templates: root.join("templates"),
            static_dir: root.join("static"),
        }
    }
}

/// Result counts of an organize run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OrganizeSummary {
    pub pages: usize,
    pub assets: usize,
    pub ignored: usize,
    pub rewritten_refs: usize,
}

/// Reset the project directory and create the templates/static subtrees.
///
/// Deletes any pre-existing directory at `root` so every conversion starts
/// from a clean, reproducible state. This is the only destructive
/// filesystem operation in the pipeline.
pub fn prepare_project_dirs(root: &Path) -> Result<ProjectDirs> {
    if root.exists() {
        fs::remove_dir_all(root)
            .with_context(|| format!("failed to reset project directory `{}`", root.display()))?;
    }

    let dirs = ProjectDirs::existing(root);
    for dir in [&dirs.templates, &dirs.static_dir] {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory `{}`", dir.display()))?;
    }
    Ok(dirs)
}

/// Copy every interesting file from the mirrored tree into its bucket.
///
/// Pages land under `templates/<relative-path>` and are rewritten after
/// the copy; assets land under `static/<relative-path>`; unrecognized
/// files are skipped. Per-file rewrite failures are logged and tolerated.
pub fn organize(site_root: &Path, dirs: &ProjectDirs) -> Result<OrganizeSummary> {
    let files = collect_files(site_root);
    let kinds: Vec<FileKind> = files.iter().map(|path| classify(path)).collect();

    let page_total = kinds.iter().filter(|k| **k == FileKind::Page).count();
    let asset_total = kinds.iter().filter(|k| **k == FileKind::Asset).count();
    let progress = ProgressLine::new(&[("pages", page_total), ("assets", asset_total)]);

    let mut summary = OrganizeSummary::default();
    for (path, kind) in files.iter().zip(kinds) {
        let rel = path
            .strip_prefix(site_root)
            .with_context(|| format!("file `{}` outside mirrored tree", path.display()))?;

        match kind {
            FileKind::Page => {
                let dest = copy_into(path, &dirs.templates, rel)?;
                match rewrite_page(&dest) {
                    Ok(count) => summary.rewritten_refs += count,
                    // Tolerated per-file: keep the unrewritten copy
                    Err(e) => log!("rewrite"; "skipped `{}`: {e:#}", rel.display()),
                }
                summary.pages += 1;
                progress.inc("pages");
            }
            FileKind::Asset => {
                copy_into(path, &dirs.static_dir, rel)?;
                summary.assets += 1;
                progress.inc("assets");
            }
            FileKind::Ignored => {
                debug!("organize"; "ignoring `{}`", rel.display());
                summary.ignored += 1;
            }
        }
    }
    progress.finish();

    Ok(summary)
}

/// Collect all regular files under a directory, sorted for determinism.
fn collect_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .collect();
    files.sort();
    files
}

/// Copy a file under `root/<rel>`, creating parent directories.
fn copy_into(src: &Path, root: &Path, rel: &Path) -> Result<PathBuf> {
    let dest = root.join(rel);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory `{}`", parent.display()))?;
    }
    fs::copy(src, &dest)
        .with_context(|| format!("failed to copy `{}` to `{}`", src.display(), dest.display()))?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_prepare_resets_existing_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("project");
        write(&root, "stale.txt", "leftover from a previous run");

        let dirs = prepare_project_dirs(&root).unwrap();

        assert!(!root.join("stale.txt").exists());
        assert!(dirs.templates.is_dir());
        assert!(dirs.static_dir.is_dir());
    }

    #[test]
    fn test_organize_partitions_files() {
        let temp = TempDir::new().unwrap();
        let site = temp.path().join("site");
        write(&site, "index.html", "<p>home</p>");
        write(&site, "blog/post.html", "<p>post</p>");
        write(&site, "css/style.css", "body {}");
        write(&site, "robots.txt", "User-agent: *");

        let dirs = prepare_project_dirs(&temp.path().join("project")).unwrap();
        let summary = organize(&site, &dirs).unwrap();

        assert_eq!(summary.pages, 2);
        assert_eq!(summary.assets, 1);
        assert_eq!(summary.ignored, 1);

        // Pages under templates/ at the same relative path, never static/
        assert!(dirs.templates.join("index.html").is_file());
        assert!(dirs.templates.join("blog/post.html").is_file());
        assert!(!dirs.static_dir.join("index.html").exists());

        // Assets under static/, never templates/
        assert!(dirs.static_dir.join("css/style.css").is_file());
        assert!(!dirs.templates.join("css/style.css").exists());

        // Ignored files dropped entirely
        assert!(!dirs.templates.join("robots.txt").exists());
        assert!(!dirs.static_dir.join("robots.txt").exists());
    }

    #[test]
    fn test_organize_rewrites_copied_pages() {
        let temp = TempDir::new().unwrap();
        let site = temp.path().join("site");
        write(
            &site,
            "index.html",
            r#"<link rel="stylesheet" href="css/style.css">"#,
        );
        write(&site, "css/style.css", "body {}");

        let dirs = prepare_project_dirs(&temp.path().join("project")).unwrap();
        let summary = organize(&site, &dirs).unwrap();

        assert_eq!(summary.rewritten_refs, 1);
        let html = fs::read_to_string(dirs.templates.join("index.html")).unwrap();
        assert!(html.contains("url_for('static', filename='css/style.css')"));

        // Source tree is never mutated
        let original = fs::read_to_string(site.join("index.html")).unwrap();
        assert!(original.contains(r#"href="css/style.css""#));
    }

    #[test]
    fn test_organize_copies_assets_byte_identical() {
        let temp = TempDir::new().unwrap();
        let site = temp.path().join("site");
        let bytes = b"\x89PNG\r\n\x1a\nfakepng";
        fs::create_dir_all(site.join("img")).unwrap();
        fs::write(site.join("img/logo.png"), bytes).unwrap();
        write(&site, "index.html", "<p>home</p>");

        let dirs = prepare_project_dirs(&temp.path().join("project")).unwrap();
        organize(&site, &dirs).unwrap();

        let copied = fs::read(dirs.static_dir.join("img/logo.png")).unwrap();
        assert_eq!(copied, bytes);
    }
}
