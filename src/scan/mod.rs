//! Heuristic static scanner: classifies an unknown source tree into an
//! [`AppModel`].
//!
//! Detection is best-effort and non-exclusive. A file may satisfy auth,
//! database, and branding signals at once; zero routes or an `unknown`
//! framework are valid outcomes, not errors. Unreadable individual files
//! are skipped with a warning and never fail the scan.

pub mod detectors;
pub mod manifest;
pub mod markers;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use thiserror::Error;
use tracing::warn;

use crate::context::ServiceContext;
use crate::model::{
    AppModel, AppType, Component, Framework, IntegrationKind, IntegrationPoint,
};
use detectors::{Detectors, Finding};
use manifest::PackageManifest;
use markers::{
    under_prefixes, AUTH_DEPENDENCIES, AUTH_PATH_GLOBS, COMPONENT_DIR_PREFIXES,
    DATABASE_DEPENDENCIES, DATABASE_PATH_GLOBS, FRAMEWORK_MARKERS, LAYOUT_COMPONENT_HINTS,
    PROTECTED_ROUTE_FRAGMENTS, ROUTE_DIR_PREFIXES,
};

/// Input errors that abort a scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The app root path does not exist.
    #[error("app root does not exist: {0}")]
    RootNotFound(PathBuf),
    /// `package.json` exists but is not valid JSON.
    #[error("failed to parse package.json: {0}")]
    ManifestParse(#[from] serde_json::Error),
    /// The tree walk itself failed (unreadable root).
    #[error("failed to walk app tree: {0}")]
    Walk(String),
}

/// Heuristic scanner over an application tree.
///
/// Holds the compiled detector patterns and glob sets as immutable
/// configuration; construct once, scan many trees.
pub struct Scanner {
    detectors: Detectors,
    auth_globs: GlobSet,
    database_globs: GlobSet,
}

impl Scanner {
    /// Builds a scanner with the fixed heuristic tables compiled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            detectors: Detectors::new(),
            auth_globs: build_globs(AUTH_PATH_GLOBS),
            database_globs: build_globs(DATABASE_PATH_GLOBS),
        }
    }

    /// Scans the tree rooted at `app_root` into an [`AppModel`].
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::RootNotFound`] when the root does not exist,
    /// [`ScanError::ManifestParse`] when `package.json` is present but
    /// unparsable, and [`ScanError::Walk`] when the tree walk fails.
    /// A missing manifest is not an error: framework and app type simply
    /// stay `Unknown`.
    pub fn scan(&self, ctx: &ServiceContext, app_root: &Path) -> Result<AppModel, ScanError> {
        if !ctx.fs.exists(app_root) {
            return Err(ScanError::RootNotFound(app_root.to_path_buf()));
        }

        let files = ctx.fs.walk(app_root).map_err(|e| ScanError::Walk(e.to_string()))?;

        let manifest = self.read_manifest(ctx, app_root, &files)?;
        let dependencies =
            manifest.as_ref().map(PackageManifest::merged_dependencies).unwrap_or_default();

        let framework = detect_framework(&dependencies, &files);
        let app_type = derive_app_type(framework);

        let mut api_routes = Vec::new();
        let mut models = Vec::new();
        let mut components = Vec::new();

        for rel_path in &files {
            let is_script = markers::is_script_file(rel_path);
            let is_prisma = rel_path.ends_with(".prisma");
            if !is_script && !is_prisma {
                continue;
            }

            let Ok(content) = ctx.fs.read_to_string(&app_root.join(rel_path)) else {
                warn!(file = %rel_path, "skipping unreadable file");
                continue;
            };

            let mut findings = Vec::new();
            if is_script && under_prefixes(rel_path, ROUTE_DIR_PREFIXES) {
                findings.extend(self.detectors.verb_routes(rel_path, &content));
                findings.extend(self.detectors.handler_routes(rel_path, &content));
            }
            if is_script {
                findings.extend(self.detectors.mongoose_models(rel_path, &content));
            }
            if is_prisma {
                findings.extend(self.detectors.prisma_models(rel_path, &content));
            }
            if is_script && under_prefixes(rel_path, COMPONENT_DIR_PREFIXES) {
                findings.extend(self.detectors.component_exports(rel_path, &content));
            }

            for finding in findings {
                match finding {
                    Finding::Route(route) => api_routes.push(route),
                    Finding::Model(model) => models.push(model),
                    Finding::Component(component) => components.push(component),
                }
            }
        }

        let has_auth = has_signal(&dependencies, AUTH_DEPENDENCIES, &self.auth_globs, &files);
        let has_database =
            has_signal(&dependencies, DATABASE_DEPENDENCIES, &self.database_globs, &files);

        let integration_points = derive_integration_points(&api_routes, &models, &components);

        Ok(AppModel {
            framework,
            app_type,
            dependencies,
            api_routes,
            models,
            components,
            has_auth,
            has_database,
            integration_points,
            scanned_at: ctx.clock.now(),
        })
    }

    /// Reads and parses `package.json` when present.
    ///
    /// A read failure on an existing manifest is downgraded to a warning
    /// (the file is treated as absent); only a parse failure is typed.
    fn read_manifest(
        &self,
        ctx: &ServiceContext,
        app_root: &Path,
        files: &[String],
    ) -> Result<Option<PackageManifest>, ScanError> {
        if !files.iter().any(|f| f == "package.json") {
            return Ok(None);
        }
        match ctx.fs.read_to_string(&app_root.join("package.json")) {
            Ok(content) => Ok(Some(PackageManifest::parse(&content)?)),
            Err(e) => {
                warn!(error = %e, "package.json exists but could not be read");
                Ok(None)
            }
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

fn build_globs(patterns: &[&str]) -> GlobSet {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).expect("invalid path glob"));
    }
    builder.build().expect("glob set must build")
}

/// Evidence-counted framework detection.
///
/// Candidates are scored in declaration order; the first whose matched
/// markers reach half its total wins. Ties between equally-plausible
/// candidates therefore resolve by table order.
fn detect_framework(dependencies: &BTreeMap<String, String>, files: &[String]) -> Framework {
    for candidate in FRAMEWORK_MARKERS {
        let mut matched = 0;
        if dependencies.contains_key(candidate.dependency) {
            matched += 1;
        }
        for path in candidate.paths {
            if path_present(files, path) {
                matched += 1;
            }
        }
        let total = candidate.paths.len() + 1;
        if matched * 2 >= total {
            return candidate.framework;
        }
    }
    Framework::Unknown
}

/// Returns `true` when `path` names a file in the tree or a directory
/// prefix of one.
fn path_present(files: &[String], path: &str) -> bool {
    let dir_prefix = format!("{path}/");
    files.iter().any(|f| f == path || f.starts_with(&dir_prefix))
}

fn derive_app_type(framework: Framework) -> AppType {
    match framework {
        Framework::Express => AppType::ApiServer,
        Framework::Unknown => AppType::Unknown,
        _ => AppType::WebApp,
    }
}

/// Boolean OR of dependency-keyword membership and path-glob hits.
fn has_signal(
    dependencies: &BTreeMap<String, String>,
    keywords: &[&str],
    globs: &GlobSet,
    files: &[String],
) -> bool {
    keywords.iter().any(|k| dependencies.contains_key(*k))
        || files.iter().any(|f| globs.is_match(f))
}

/// Derives reporting-only integration points from extraction results.
///
/// Runs strictly after route/model/component extraction.
fn derive_integration_points(
    api_routes: &[crate::model::ApiRoute],
    models: &[crate::model::DataModel],
    components: &[Component],
) -> Vec<IntegrationPoint> {
    let mut points = Vec::new();

    for route in api_routes {
        let lowered = route.path.to_lowercase();
        if let Some(fragment) =
            PROTECTED_ROUTE_FRAGMENTS.iter().find(|frag| lowered.contains(*frag))
        {
            points.push(IntegrationPoint {
                kind: IntegrationKind::Auth,
                source_file: route.source_file.clone(),
                rationale: format!(
                    "route {} {} touches protected path segment '{fragment}'",
                    route.method, route.path
                ),
            });
        }
    }

    for model in models {
        points.push(IntegrationPoint {
            kind: IntegrationKind::Database,
            source_file: model.source_file.clone(),
            rationale: format!("model {} should carry the shared platform fields", model.name),
        });
    }

    for component in components {
        if let Some(hint) = LAYOUT_COMPONENT_HINTS.iter().find(|h| component.name.contains(*h)) {
            points.push(IntegrationPoint {
                kind: IntegrationKind::Branding,
                source_file: component.source_file.clone(),
                rationale: format!(
                    "component {} looks layout-like ('{hint}') and should adopt platform branding",
                    component.name
                ),
            });
        }
    }

    points
}
