//! Route derivation from the organized template tree.
//!
//! Every page file under `templates/` yields one route. Handler and
//! route-path uniqueness is checked up front so a name clash fails the
//! run with a descriptive error instead of silently overwriting a route
//! registration.

use jwalk::WalkDir;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::classify::is_page_file;

/// A single route registration for the generated scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// URL path, e.g. `/` or `/blog/post`.
    pub path: String,
    /// Python handler function name, unique across the scaffold.
    pub handler: String,
    /// Template path relative to `templates/`, `/`-separated.
    pub template: String,
}

/// Route synthesis errors.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error(
        "handler conflict: templates `{first}` and `{second}` both normalize to function `{handler}`; rename one of the pages"
    )]
    HandlerConflict {
        handler: String,
        first: String,
        second: String,
    },

    #[error(
        "route conflict: templates `{first}` and `{second}` both map to URL path `{route}`; rename one of the pages"
    )]
    RouteConflict {
        route: String,
        first: String,
        second: String,
    },
}

/// Derive one route per page file under `templates_dir`.
///
/// Routes are sorted by template path so emission is deterministic.
/// Duplicate handler names or route paths fail fast.
pub fn collect_routes(templates_dir: &Path) -> Result<Vec<Route>, RouteError> {
    let mut pages: Vec<PathBuf> = WalkDir::new(templates_dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|p| is_page_file(p))
        .collect();
    pages.sort();

    let mut by_handler: FxHashMap<String, String> = FxHashMap::default();
    let mut by_path: FxHashMap<String, String> = FxHashMap::default();
    let mut routes = Vec::with_capacity(pages.len());

    for page in &pages {
        let Ok(rel) = page.strip_prefix(templates_dir) else {
            continue;
        };
        let Some(stem) = rel.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let template = slash_join(rel);
        let handler = stem.replace(['-', '.'], "_");
        let path = if stem == "index" {
            "/".to_string()
        } else {
            format!("/{}", slash_join(&rel.with_extension("")))
        };

        if let Some(first) = by_handler.insert(handler.clone(), template.clone()) {
            return Err(RouteError::HandlerConflict {
                handler,
                first,
                second: template,
            });
        }
        if let Some(first) = by_path.insert(path.clone(), template.clone()) {
            return Err(RouteError::RouteConflict {
                route: path,
                first,
                second: template,
            });
        }

        routes.push(Route {
            path,
            handler,
            template,
        });
    }

    Ok(routes)
}

/// Join path components with `/` regardless of platform separator.
fn slash_join(path: &Path) -> String {
    path.iter()
        .map(|c| c.to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "<p></p>").unwrap();
    }

    #[test]
    fn test_index_maps_to_root() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "index.html");

        let routes = collect_routes(temp.path()).unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].path, "/");
        assert_eq!(routes[0].handler, "index");
        assert_eq!(routes[0].template, "index.html");
    }

    #[test]
    fn test_nested_page_route() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "blog/post.html");

        let routes = collect_routes(temp.path()).unwrap();
        assert_eq!(routes[0].path, "/blog/post");
        assert_eq!(routes[0].handler, "post");
        assert_eq!(routes[0].template, "blog/post.html");
    }

    #[test]
    fn test_handler_normalization() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "my-page.html");

        let routes = collect_routes(temp.path()).unwrap();
        assert_eq!(routes[0].handler, "my_page");
        assert_eq!(routes[0].path, "/my-page");
    }

    #[test]
    fn test_handler_collision_fails_fast() {
        // a.b.html and a-b.html both normalize to handler a_b
        let temp = TempDir::new().unwrap();
        write(temp.path(), "a.b.html");
        write(temp.path(), "a-b.html");

        let err = collect_routes(temp.path()).unwrap_err();
        match err {
            RouteError::HandlerConflict { handler, .. } => assert_eq!(handler, "a_b"),
            other => panic!("expected handler conflict, got: {other}"),
        }
    }

    #[test]
    fn test_nested_index_route_collision() {
        // Any page whose base name is `index` maps to `/`; two of them is
        // a route conflict, not a silent overwrite
        let temp = TempDir::new().unwrap();
        write(temp.path(), "index.html");
        write(temp.path(), "blog/index.html");

        let err = collect_routes(temp.path()).unwrap_err();
        assert!(matches!(err, RouteError::HandlerConflict { .. }));
    }

    #[test]
    fn test_emission_order_is_sorted() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "zebra.html");
        write(temp.path(), "alpha.html");
        write(temp.path(), "blog/post.html");

        let routes = collect_routes(temp.path()).unwrap();
        let templates: Vec<_> = routes.iter().map(|r| r.template.as_str()).collect();
        assert_eq!(templates, ["alpha.html", "blog/post.html", "zebra.html"]);
    }

    #[test]
    fn test_non_page_files_skipped() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "index.html");
        fs::write(temp.path().join("notes.txt"), "not a page").unwrap();

        let routes = collect_routes(temp.path()).unwrap();
        assert_eq!(routes.len(), 1);
    }

    #[test]
    fn test_htm_pages_get_routes() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "about.htm");

        let routes = collect_routes(temp.path()).unwrap();
        assert_eq!(routes[0].path, "/about");
        assert_eq!(routes[0].template, "about.htm");
    }
}
