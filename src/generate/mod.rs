//! Template-driven generator: renders an [`AppModel`] plus caller
//! preferences into a fixed set of integration artifacts.
//!
//! Output always lands under an isolated output root, never inside the
//! scanned tree. Rendering is pure: identical inputs produce
//! byte-identical files. Partial output written before a failure is not
//! rolled back; the operator reviews the output directory as a unit.

pub mod templates;

use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Write as _;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::context::ServiceContext;
use crate::model::{AppModel, Framework, Preferences};

/// Fixed packages the platform integration requires.
const REQUIRED_PACKAGES: &[(&str, &str)] = &[
    ("connect-mongo", "^5.1.0"),
    ("express-session", "^1.18.0"),
    ("mongoose", "^8.4.0"),
];

/// Fixed script entries appended to the manifest patch.
const PLATFORM_SCRIPTS: &[(&str, &str)] = &[
    ("platform:dev", "node server.js --platform"),
    ("platform:start", "NODE_ENV=production node server.js --platform"),
];

/// Semantic type of a generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// express-session wiring.
    SessionMiddleware,
    /// Shared mongoose connector.
    DatabaseConnector,
    /// One schema file per discovered model.
    ModelFile,
    /// Platform logo.
    Logo,
    /// Platform navigation component.
    Navigation,
    /// Platform stylesheet.
    Stylesheet,
    /// Proxy route into the embedded app.
    ProxyRoute,
    /// Catalog landing page.
    LandingPage,
    /// Environment-variable file.
    EnvConfig,
    /// Operator documentation.
    Documentation,
    /// Dependency-manifest patch.
    ManifestPatch,
    /// Anything else (mutated app files, for instance).
    Other,
}

impl ArtifactKind {
    /// Infers the artifact kind from a generated or mutated path.
    ///
    /// Used when verifying the mutation strategy's output, where files
    /// have no recorded kind.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        if path.ends_with("middleware/session.js") {
            ArtifactKind::SessionMiddleware
        } else if path.ends_with("lib/db.js") {
            ArtifactKind::DatabaseConnector
        } else if path.ends_with("routes/proxy.js") {
            ArtifactKind::ProxyRoute
        } else if path.ends_with(".env.integration") {
            ArtifactKind::EnvConfig
        } else if path.contains("models/") {
            ArtifactKind::ModelFile
        } else {
            ArtifactKind::Other
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::SessionMiddleware => "session-middleware",
            ArtifactKind::DatabaseConnector => "database-connector",
            ArtifactKind::ModelFile => "model-file",
            ArtifactKind::Logo => "logo",
            ArtifactKind::Navigation => "navigation",
            ArtifactKind::Stylesheet => "stylesheet",
            ArtifactKind::ProxyRoute => "proxy-route",
            ArtifactKind::LandingPage => "landing-page",
            ArtifactKind::EnvConfig => "env-config",
            ArtifactKind::Documentation => "documentation",
            ArtifactKind::ManifestPatch => "manifest-patch",
            ArtifactKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// One artifact the generator produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Semantic type.
    pub kind: ArtifactKind,
    /// Path relative to the output root.
    pub path: String,
    /// Human-readable description for reports.
    pub description: String,
}

/// Errors that abort generation.
///
/// The first rendering or filesystem failure wins; artifacts already
/// written stay on disk.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// An artifact failed to render.
    #[error("failed to render {artifact}: {reason}")]
    Render {
        /// Which artifact.
        artifact: String,
        /// Why rendering failed.
        reason: String,
    },
    /// A write failed.
    #[error("failed to write {path}: {reason}")]
    Write {
        /// Output path.
        path: String,
        /// Underlying failure.
        reason: String,
    },
}

/// Proxy port by detected framework, with a fixed fallback.
#[must_use]
pub fn proxy_port(framework: Framework) -> u16 {
    match framework {
        Framework::Express => 3001,
        Framework::Angular => 4200,
        Framework::Next | Framework::React | Framework::Vue | Framework::Svelte
        | Framework::Unknown => 3000,
    }
}

/// Renders the full artifact pipeline for `model` under `output_root`.
///
/// Conditional artifacts follow the preference flags; the proxy route,
/// landing page, environment config, documentation, and manifest patch
/// are always produced.
///
/// # Errors
///
/// Returns [`GenerateError`] wrapping the first rendering or filesystem
/// failure. Already-written artifacts are not rolled back.
pub fn generate(
    ctx: &ServiceContext,
    model: &AppModel,
    prefs: &Preferences,
    output_root: &Path,
) -> Result<Vec<GeneratedFile>, GenerateError> {
    let port = proxy_port(model.framework).to_string();
    let slug = templates::slugify(&prefs.app_name);
    let subs: Vec<(&str, &str)> = vec![
        ("app_name", prefs.app_name.as_str()),
        ("app_slug", slug.as_str()),
        ("description", prefs.description.as_str()),
        ("category", prefs.category.as_str()),
        ("port", port.as_str()),
    ];

    let mut generated = Vec::new();

    if prefs.add_auth {
        emit(
            ctx,
            output_root,
            &mut generated,
            ArtifactKind::SessionMiddleware,
            "middleware/session.js",
            &templates::render(templates::SESSION_MIDDLEWARE, &subs),
            "express-session wiring with the platform session guard",
        )?;
    }

    if prefs.add_database {
        emit(
            ctx,
            output_root,
            &mut generated,
            ArtifactKind::DatabaseConnector,
            "lib/db.js",
            &templates::render(templates::DATABASE_CONNECTOR, &subs),
            "shared mongoose connector exposing platformFields",
        )?;
        for data_model in &model.models {
            let collection_arg = data_model
                .collection
                .as_ref()
                .map(|c| format!(", '{c}'"))
                .unwrap_or_default();
            let mut model_subs = subs.clone();
            model_subs.push(("model_name", data_model.name.as_str()));
            model_subs.push(("collection_arg", collection_arg.as_str()));
            emit(
                ctx,
                output_root,
                &mut generated,
                ArtifactKind::ModelFile,
                &format!("models/{}.js", data_model.name),
                &templates::render(templates::MODEL_FILE, &model_subs),
                &format!("schema for {} extending platformFields", data_model.name),
            )?;
        }
    }

    if prefs.add_branding {
        emit(
            ctx,
            output_root,
            &mut generated,
            ArtifactKind::Logo,
            "public/platform-logo.svg",
            &templates::render(templates::LOGO, &subs),
            "platform logo placeholder",
        )?;
        emit(
            ctx,
            output_root,
            &mut generated,
            ArtifactKind::Navigation,
            "components/PlatformNav.jsx",
            &templates::render(templates::NAVIGATION, &subs),
            "platform navigation bar",
        )?;
        emit(
            ctx,
            output_root,
            &mut generated,
            ArtifactKind::Stylesheet,
            "styles/platform.css",
            &templates::render(templates::STYLESHEET, &subs),
            "platform stylesheet",
        )?;
    }

    emit(
        ctx,
        output_root,
        &mut generated,
        ArtifactKind::ProxyRoute,
        "routes/proxy.js",
        &templates::render(templates::PROXY_ROUTE, &subs),
        "proxy route forwarding platform traffic to the app",
    )?;
    emit(
        ctx,
        output_root,
        &mut generated,
        ArtifactKind::LandingPage,
        "components/LandingPage.jsx",
        &templates::render(templates::LANDING_PAGE, &subs),
        "catalog landing page",
    )?;
    emit(
        ctx,
        output_root,
        &mut generated,
        ArtifactKind::EnvConfig,
        ".env.integration",
        &templates::render(templates::ENV_CONFIG, &subs),
        "integration environment variables",
    )?;

    // Documentation lists everything emitted so far plus itself and the
    // manifest patch, so assemble the list up front.
    let mut artifact_list = String::new();
    for file in &generated {
        let _ = writeln!(artifact_list, "- `{}`: {}", file.path, file.description);
    }
    let _ = writeln!(artifact_list, "- `INTEGRATION.md`: this document");
    let _ = writeln!(
        artifact_list,
        "- `package.platform.json`: dependency and script patch for your manifest"
    );
    let mut doc_subs = subs.clone();
    doc_subs.push(("artifact_list", artifact_list.as_str()));
    emit(
        ctx,
        output_root,
        &mut generated,
        ArtifactKind::Documentation,
        "INTEGRATION.md",
        &templates::render(templates::DOCUMENTATION, &doc_subs),
        "operator integration guide",
    )?;

    let patch = render_manifest_patch(model, prefs)?;
    emit(
        ctx,
        output_root,
        &mut generated,
        ArtifactKind::ManifestPatch,
        "package.platform.json",
        &patch,
        "manifest patch with required packages and platform scripts",
    )?;

    Ok(generated)
}

/// Renders one artifact and records it.
fn emit(
    ctx: &ServiceContext,
    output_root: &Path,
    generated: &mut Vec<GeneratedFile>,
    kind: ArtifactKind,
    rel_path: &str,
    content: &str,
    description: &str,
) -> Result<(), GenerateError> {
    ctx.fs.write(&output_root.join(rel_path), content).map_err(|e| GenerateError::Write {
        path: rel_path.to_string(),
        reason: e.to_string(),
    })?;
    generated.push(GeneratedFile {
        kind,
        path: rel_path.to_string(),
        description: description.to_string(),
    });
    Ok(())
}

/// Builds the sibling manifest patch.
///
/// Required packages are written first and the app's existing entries
/// layered after, so an existing pin at a different version survives the
/// merge (last writer wins). The patch never touches the live manifest.
fn render_manifest_patch(model: &AppModel, prefs: &Preferences) -> Result<String, GenerateError> {
    let mut dependencies: BTreeMap<String, String> = REQUIRED_PACKAGES
        .iter()
        .map(|(name, version)| ((*name).to_string(), (*version).to_string()))
        .collect();
    for (name, version) in &model.dependencies {
        dependencies.insert(name.clone(), version.clone());
    }

    let scripts: BTreeMap<String, String> = PLATFORM_SCRIPTS
        .iter()
        .map(|(name, command)| ((*name).to_string(), (*command).to_string()))
        .collect();

    let patch = serde_json::json!({
        "name": templates::slugify(&prefs.app_name),
        "dependencies": dependencies,
        "scripts": scripts,
    });

    let mut rendered = serde_json::to_string_pretty(&patch).map_err(|e| GenerateError::Render {
        artifact: "package.platform.json".to_string(),
        reason: e.to_string(),
    })?;
    rendered.push('\n');
    Ok(rendered)
}
