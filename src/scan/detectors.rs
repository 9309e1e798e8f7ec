//! Pattern-family detectors for routes, models, and components.
//!
//! Each detector maps file content to zero or more findings. Detectors
//! are independent and their results are unioned, never short-circuited:
//! one file may contribute routes from both pattern families, models from
//! both ORM idioms, and component findings at the same time. This
//! overlap is load-bearing; integration-point derivation depends on it.

use regex::Regex;

use crate::model::{ApiRoute, Component, DataModel, Framework, OrmKind};

/// One typed detection result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// An HTTP route declaration.
    Route(ApiRoute),
    /// A data-model declaration.
    Model(DataModel),
    /// An exported UI-layer symbol.
    Component(Component),
}

/// Compiled detector patterns.
///
/// Patterns are fixed; compilation happens once at construction so the
/// scanner holds no mutable global state.
pub struct Detectors {
    verb_route: Regex,
    handler_route: Regex,
    mongoose_model: Regex,
    prisma_model: Regex,
    component_export: Regex,
}

impl Detectors {
    /// Compiles the fixed pattern set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            verb_route: Regex::new(
                r#"\b(?:app|router)\s*\.\s*(get|post|put|patch|delete)\s*\(\s*['"`]([^'"`]+)['"`]"#,
            )
            .expect("invalid verb-route pattern"),
            handler_route: Regex::new(
                r"(?m)^\s*export\s+(?:default\s+)?(?:async\s+)?function\s+(GET|POST|PUT|PATCH|DELETE)\b",
            )
            .expect("invalid handler-route pattern"),
            mongoose_model: Regex::new(
                r#"(?:mongoose|db)\.model\s*\(\s*['"](\w+)['"](?:\s*,\s*[A-Za-z_$][\w$]*\s*,\s*['"]([\w.-]+)['"])?"#,
            )
            .expect("invalid mongoose-model pattern"),
            prisma_model: Regex::new(r"(?m)^\s*model\s+([A-Za-z_]\w*)\s*\{")
                .expect("invalid prisma-model pattern"),
            component_export: Regex::new(
                r"(?m)^\s*export\s+(?:default\s+)?(?:async\s+)?(?:function|class|const|let|var)\s+([A-Z]\w*)",
            )
            .expect("invalid component-export pattern"),
        }
    }

    /// Finds explicit HTTP-verb call routes (`app.get('/path', ...)`).
    #[must_use]
    pub fn verb_routes(&self, rel_path: &str, content: &str) -> Vec<Finding> {
        self.verb_route
            .captures_iter(content)
            .map(|caps| {
                Finding::Route(ApiRoute {
                    method: caps[1].to_uppercase(),
                    path: caps[2].to_string(),
                    source_file: rel_path.to_string(),
                    framework: Framework::Express,
                })
            })
            .collect()
    }

    /// Finds exported handler-function routes (`export async function GET`).
    ///
    /// The route path is derived from the file location, Next.js style.
    #[must_use]
    pub fn handler_routes(&self, rel_path: &str, content: &str) -> Vec<Finding> {
        self.handler_route
            .captures_iter(content)
            .map(|caps| {
                Finding::Route(ApiRoute {
                    method: caps[1].to_string(),
                    path: route_path_from_file(rel_path),
                    source_file: rel_path.to_string(),
                    framework: Framework::Next,
                })
            })
            .collect()
    }

    /// Finds `mongoose.model('Name', schema[, 'collection'])` declarations.
    #[must_use]
    pub fn mongoose_models(&self, rel_path: &str, content: &str) -> Vec<Finding> {
        self.mongoose_model
            .captures_iter(content)
            .map(|caps| {
                Finding::Model(DataModel {
                    name: caps[1].to_string(),
                    collection: caps.get(2).map(|m| m.as_str().to_string()),
                    source_file: rel_path.to_string(),
                    orm: OrmKind::Mongoose,
                })
            })
            .collect()
    }

    /// Finds `model Name { ... }` blocks in Prisma schemas.
    #[must_use]
    pub fn prisma_models(&self, rel_path: &str, content: &str) -> Vec<Finding> {
        self.prisma_model
            .captures_iter(content)
            .map(|caps| {
                Finding::Model(DataModel {
                    name: caps[1].to_string(),
                    collection: None,
                    source_file: rel_path.to_string(),
                    orm: OrmKind::Prisma,
                })
            })
            .collect()
    }

    /// Finds exported top-level declarations with upper-case identifiers.
    ///
    /// Uppercase exported constants qualify too; that false-positive rate
    /// is accepted at this tier.
    #[must_use]
    pub fn component_exports(&self, rel_path: &str, content: &str) -> Vec<Finding> {
        self.component_export
            .captures_iter(content)
            .map(|caps| {
                Finding::Component(Component {
                    name: caps[1].to_string(),
                    source_file: rel_path.to_string(),
                })
            })
            .collect()
    }
}

impl Default for Detectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Derives a route path from a handler file location.
///
/// `app/api/users/route.ts` and `pages/api/users.ts` both map to
/// `/api/users`; an `index` file maps to its directory.
fn route_path_from_file(rel_path: &str) -> String {
    let mut path = rel_path;
    for prefix in ["src/", "app/", "pages/"] {
        path = path.strip_prefix(prefix).unwrap_or(path);
    }
    let path = path.rsplit_once('.').map_or(path, |(stem, _ext)| stem);
    let path = path.strip_suffix("/route").unwrap_or(path);
    let path = path.strip_suffix("/index").unwrap_or(path);
    if path.is_empty() {
        "/".to_string()
    } else {
        format!("/{path}")
    }
}
