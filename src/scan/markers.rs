//! Fixed heuristic tables driving the scanner.
//!
//! All detection data lives here as immutable configuration so multiple
//! pipeline instances never interfere. Counts and sets mirror the
//! conventions of the app trees the platform ingests; they are heuristics,
//! not ground truth.

use crate::model::Framework;

/// Evidence markers for one candidate framework.
///
/// A candidate qualifies when its matched-marker count is at least half
/// its total marker count (the dependency name counts as one marker).
pub struct FrameworkMarkers {
    /// Framework this row scores.
    pub framework: Framework,
    /// Manifest dependency whose presence counts as one marker.
    pub dependency: &'static str,
    /// Characteristic paths relative to the app root.
    pub paths: &'static [&'static str],
}

/// Candidate frameworks in priority order. First qualifier wins; ties
/// resolve by declaration order, not score.
pub const FRAMEWORK_MARKERS: &[FrameworkMarkers] = &[
    FrameworkMarkers {
        framework: Framework::Next,
        dependency: "next",
        paths: &["next.config.js", "next.config.mjs", "pages", "app"],
    },
    FrameworkMarkers {
        framework: Framework::React,
        dependency: "react",
        paths: &["src/App.js", "src/App.jsx", "src/App.tsx", "public/index.html"],
    },
    FrameworkMarkers {
        framework: Framework::Express,
        dependency: "express",
        paths: &["server.js", "app.js", "routes"],
    },
    FrameworkMarkers {
        framework: Framework::Vue,
        dependency: "vue",
        paths: &["vue.config.js", "src/App.vue", "src/main.js"],
    },
    FrameworkMarkers {
        framework: Framework::Angular,
        dependency: "@angular/core",
        paths: &["angular.json", "src/main.ts", "src/app"],
    },
    FrameworkMarkers {
        framework: Framework::Svelte,
        dependency: "svelte",
        paths: &["svelte.config.js", "src/App.svelte"],
    },
];

/// Dependency names that signal auth wiring.
pub const AUTH_DEPENDENCIES: &[&str] = &[
    "passport",
    "next-auth",
    "express-session",
    "cookie-session",
    "jsonwebtoken",
    "bcrypt",
    "bcryptjs",
    "@auth0/nextjs-auth0",
];

/// Path globs that signal auth wiring.
pub const AUTH_PATH_GLOBS: &[&str] =
    &["**/auth/**", "**/middleware/auth*", "**/login*", "**/session*"];

/// Dependency names that signal database use.
pub const DATABASE_DEPENDENCIES: &[&str] = &[
    "mongoose",
    "prisma",
    "@prisma/client",
    "mongodb",
    "pg",
    "mysql",
    "mysql2",
    "sequelize",
    "typeorm",
    "knex",
];

/// Path globs that signal database use.
pub const DATABASE_PATH_GLOBS: &[&str] =
    &["**/models/**", "**/prisma/schema.prisma", "**/db.*", "**/database.*"];

/// Route-path fragments that mark a route as needing session auth.
pub const PROTECTED_ROUTE_FRAGMENTS: &[&str] =
    &["admin", "dashboard", "account", "profile", "settings", "user"];

/// Component-name substrings that mark a component as layout-like, and
/// therefore a branding integration point.
pub const LAYOUT_COMPONENT_HINTS: &[&str] = &["Layout", "Nav", "Header", "Footer", "Sidebar"];

/// First path segments searched for route declarations. Root-level files
/// are always candidates as well (`server.js`, `app.js`, ...).
pub const ROUTE_DIR_PREFIXES: &[&str] = &["routes", "api", "server", "src", "pages", "app"];

/// First path segments searched for component declarations.
pub const COMPONENT_DIR_PREFIXES: &[&str] = &["components", "src", "pages", "app"];

/// Extensions treated as script source.
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx", "mjs", "cjs"];

/// Returns `true` when the relative path has a script extension.
#[must_use]
pub fn is_script_file(rel_path: &str) -> bool {
    rel_path
        .rsplit('.')
        .next()
        .is_some_and(|ext| SCRIPT_EXTENSIONS.contains(&ext))
}

/// Returns `true` when the relative path sits under one of the given
/// first segments, or directly at the root.
#[must_use]
pub fn under_prefixes(rel_path: &str, prefixes: &[&str]) -> bool {
    match rel_path.split_once('/') {
        Some((first, _)) => prefixes.contains(&first),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_extension_matching() {
        assert!(is_script_file("routes/users.js"));
        assert!(is_script_file("app/api/route.ts"));
        assert!(!is_script_file("README.md"));
        assert!(!is_script_file("schema.prisma"));
    }

    #[test]
    fn prefix_matching_includes_root_files() {
        assert!(under_prefixes("server.js", ROUTE_DIR_PREFIXES));
        assert!(under_prefixes("routes/users.js", ROUTE_DIR_PREFIXES));
        assert!(!under_prefixes("docs/server.js", ROUTE_DIR_PREFIXES));
    }

    #[test]
    fn framework_priority_order_is_fixed() {
        let order: Vec<Framework> = FRAMEWORK_MARKERS.iter().map(|m| m.framework).collect();
        assert_eq!(
            order,
            vec![
                Framework::Next,
                Framework::React,
                Framework::Express,
                Framework::Vue,
                Framework::Angular,
                Framework::Svelte,
            ]
        );
    }
}
