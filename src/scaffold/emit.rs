//! Scaffold file emission: app.py and requirements.txt.

use anyhow::{Context, Result};
use std::fs;

use super::route::Route;
use crate::organize::ProjectDirs;

/// Declared dependencies: the web framework and the markup parser.
const REQUIREMENTS: &str = "flask\nbs4\n";

/// Render the Flask application source for the given routes.
pub fn render_app(routes: &[Route]) -> String {
    let mut blocks = String::new();
    for route in routes {
        blocks.push_str(&format!(
            "\n@app.route('{}')\ndef {}():\n    return render_template('{}')",
            route.path, route.handler, route.template
        ));
    }

    format!(
        "from flask import Flask, render_template\napp = Flask(__name__)\n\n{blocks}\n\nif __name__ == '__main__':\n    app.run(debug=True)\n"
    )
}

/// Write app.py and requirements.txt into the project root.
pub fn write_scaffold(dirs: &ProjectDirs, routes: &[Route]) -> Result<()> {
    let app_path = dirs.root.join("app.py");
    fs::write(&app_path, render_app(routes))
        .with_context(|| format!("failed to write `{}`", app_path.display()))?;

    let requirements_path = dirs.root.join("requirements.txt");
    fs::write(&requirements_path, REQUIREMENTS)
        .with_context(|| format!("failed to write `{}`", requirements_path.display()))?;

    Ok(())
}
