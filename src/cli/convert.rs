//! Convert pipeline driver.
//!
//! Stages: mirror (wget subprocess) → discover site root → organize
//! (classify + copy + rewrite) → synthesize routes and emit the scaffold.

use anyhow::{Context, Result};
use std::{
    io::{self, Write},
    path::Path,
    time::Duration,
};

use crate::cli::ConvertArgs;
use crate::mirror::{self, Discovery, discover_site_root};
use crate::organize::{ProjectDirs, organize, prepare_project_dirs};
use crate::scaffold::{collect_routes, write_scaffold};
use crate::{debug, log};

/// Default destination directory name.
const DEFAULT_PROJECT_NAME: &str = "flask_project";

/// Directory wget downloads into when no --mirror-dir is given.
const DOWNLOAD_DIR: &str = "downloaded_site";

/// Run the full conversion pipeline.
pub fn run_convert(args: &ConvertArgs) -> Result<()> {
    let interactive = args.url.is_none();
    let url = match &args.url {
        Some(url) => url.clone(),
        None => prompt_required("Enter website URL: ")?,
    };
    let name = match &args.name {
        Some(name) => name.clone(),
        None if interactive => prompt_with_default(
            "Enter Flask project folder name: ",
            DEFAULT_PROJECT_NAME,
        )?,
        None => DEFAULT_PROJECT_NAME.to_string(),
    };

    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let project_root = cwd.join(&name);

    let site = match &args.mirror_dir {
        Some(dir) => discover_site_root(dir, &url)?,
        None => {
            let download_dir = cwd.join(DOWNLOAD_DIR);
            let timeout =
                (args.mirror_timeout > 0).then(|| Duration::from_secs(args.mirror_timeout));
            mirror::mirror_site(&url, &download_dir, timeout)?;
            discover_site_root(&download_dir, &url)?
        }
    };
    if site.strategy == Discovery::IndexScan {
        log!("mirror"; "host directory missing; fell back to an index.html scan");
    }
    debug!("mirror"; "site root `{}`", site.path.display());

    log!("organize"; "organizing files into `{}`", project_root.display());
    let dirs = prepare_project_dirs(&project_root)?;
    let summary = organize(&site.path, &dirs)?;
    anyhow::ensure!(
        summary.pages > 0,
        "no page files found under `{}`; refusing to emit an empty project",
        site.path.display()
    );
    log!("organize"; "{} pages, {} assets, {} ignored, {} references rewritten",
        summary.pages, summary.assets, summary.ignored, summary.rewritten_refs);

    synthesize(&dirs)?;

    log!("done"; "Flask-ready project created at `{}`", project_root.display());
    Ok(())
}

/// Regenerate the scaffold for an already-organized project.
pub fn run_scaffold(project: &Path) -> Result<()> {
    let dirs = ProjectDirs::existing(project);
    anyhow::ensure!(
        dirs.templates.is_dir(),
        "`{}` has no templates/ directory; run convert first",
        project.display()
    );
    synthesize(&dirs)
}

/// Route synthesis over an organized project tree.
fn synthesize(dirs: &ProjectDirs) -> Result<()> {
    let routes = collect_routes(&dirs.templates)?;
    write_scaffold(dirs, &routes)?;
    log!("scaffold"; "registered {} route{}", routes.len(),
        if routes.len() == 1 { "" } else { "s" });
    Ok(())
}

/// Prompt on stdout and read one trimmed line from stdin.
fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush().ok();

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim().to_string())
}

fn prompt_required(message: &str) -> Result<String> {
    let value = prompt(message)?;
    anyhow::ensure!(!value.is_empty(), "a website URL is required");
    Ok(value)
}

fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let value = prompt(message)?;
    Ok(if value.is_empty() {
        default.to_string()
    } else {
        value
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Full pipeline over a pre-mirrored tree (no wget involved).
    #[test]
    fn test_convert_existing_mirror_end_to_end() {
        let temp = TempDir::new().unwrap();
        let mirror = temp.path().join("mirror");
        write(
            &mirror,
            "example.com/index.html",
            concat!(
                r#"<html><head><link rel="stylesheet" href="css/style.css"></head>"#,
                r#"<body><img src="img/logo.png"></body></html>"#,
            ),
        );
        write(&mirror, "example.com/css/style.css", "body { margin: 0 }");
        write(&mirror, "example.com/img/logo.png", "png-bytes");

        let project = temp.path().join("converted");
        let args = ConvertArgs {
            url: Some("https://example.com".to_string()),
            name: Some(project.to_string_lossy().into_owned()),
            mirror_dir: Some(mirror),
            mirror_timeout: 0,
        };
        run_convert(&args).unwrap();

        // Page rewritten in templates/
        let html = fs::read_to_string(project.join("templates/index.html")).unwrap();
        assert!(html.contains("{{ url_for('static', filename='css/style.css') }}"));
        assert!(html.contains("{{ url_for('static', filename='img/logo.png') }}"));

        // Assets byte-identical in static/
        assert_eq!(
            fs::read_to_string(project.join("static/css/style.css")).unwrap(),
            "body { margin: 0 }"
        );
        assert_eq!(
            fs::read_to_string(project.join("static/img/logo.png")).unwrap(),
            "png-bytes"
        );

        // Scaffold registers exactly one route, `/`
        let app = fs::read_to_string(project.join("app.py")).unwrap();
        assert_eq!(app.matches("@app.route(").count(), 1);
        assert!(app.contains("@app.route('/')\ndef index():\n    return render_template('index.html')"));
        assert!(project.join("requirements.txt").is_file());
    }

    #[test]
    fn test_convert_aborts_on_empty_mirror() {
        let temp = TempDir::new().unwrap();
        let mirror = temp.path().join("mirror");
        fs::create_dir_all(&mirror).unwrap();

        let args = ConvertArgs {
            url: Some("https://example.com".to_string()),
            name: Some(temp.path().join("converted").to_string_lossy().into_owned()),
            mirror_dir: Some(mirror),
            mirror_timeout: 0,
        };
        let err = run_convert(&args).unwrap_err();
        assert!(err.to_string().contains("no mirrored content"));
    }

    #[test]
    fn test_scaffold_requires_templates_dir() {
        let temp = TempDir::new().unwrap();
        let err = run_scaffold(temp.path()).unwrap_err();
        assert!(err.to_string().contains("templates/"));
    }

    #[test]
    fn test_scaffold_regenerates_routes() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "templates/index.html", "<p>home</p>");
        write(temp.path(), "templates/about.html", "<p>about</p>");

        run_scaffold(temp.path()).unwrap();

        let app = fs::read_to_string(temp.path().join("app.py")).unwrap();
        assert!(app.contains("@app.route('/')"));
        assert!(app.contains("@app.route('/about')"));
    }
}
