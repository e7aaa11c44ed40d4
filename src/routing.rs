//! Route Resolver
//!
//! Exact matching only: no trailing-slash collapsing, no case folding.
//! The project id is passed through unchecked; the composer decides
//! whether it exists.

use serde::{Deserialize, Serialize};

use crate::catalog::ProjectId;

pub const HOME_PATH: &str = "/";
pub const PROJECTS_PREFIX: &str = "/projects/";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "route", content = "id", rename_all = "snake_case")]
pub enum Route {
    Home,
    ProjectDetail(ProjectId),
    NotFound,
}

impl Route {
    /// Resolve a path. First match wins: Home, ProjectDetail, NotFound.
    pub fn resolve(path: &str) -> Self {
        if path == HOME_PATH {
            return Route::Home;
        }

        if let Some(id) = path.strip_prefix(PROJECTS_PREFIX) {
            if !id.is_empty() && !id.contains('/') {
                return Route::ProjectDetail(id.to_string());
            }
        }

        Route::NotFound
    }

    /// Canonical path for this route. `NotFound` has none.
    pub fn path(&self) -> Option<String> {
        match self {
            Route::Home => Some(HOME_PATH.to_string()),
            Route::ProjectDetail(id) => Some(project_path(id)),
            Route::NotFound => None,
        }
    }
}

pub fn project_path(id: &str) -> String {
    format!("{}{}", PROJECTS_PREFIX, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_home() {
        assert_eq!(Route::resolve("/"), Route::Home);
    }

    #[test]
    fn test_project_id_extracted_verbatim() {
        assert_eq!(
            Route::resolve("/projects/project-one"),
            Route::ProjectDetail("project-one".to_string())
        );
        assert_eq!(
            Route::resolve("/projects/Does-Not-Exist"),
            Route::ProjectDetail("Does-Not-Exist".to_string())
        );
    }

    #[test]
    fn test_everything_else_is_not_found() {
        for path in [
            "",
            "//",
            "/about",
            "/projects",
            "/projects/",
            "/projects/a/b",
            "/projects/a/",
            "/Projects/a",
            "projects/a",
            "/api",
        ] {
            assert_eq!(Route::resolve(path), Route::NotFound, "path {path:?}");
        }
    }

    #[test]
    fn test_path_round_trips_for_resolvable_routes() {
        let route = Route::ProjectDetail("project-two".to_string());
        let path = route.path().unwrap();
        assert_eq!(Route::resolve(&path), route);
        assert_eq!(Route::NotFound.path(), None);
    }
}
