//! The structured result of scanning an application tree.
//!
//! An [`AppModel`] is produced once per scan and never mutated afterwards.
//! The scanner exclusively owns construction; downstream components hold
//! the model by shared reference.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Web frameworks the scanner can classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    /// Next.js.
    Next,
    /// Create-React-App style React.
    React,
    /// Express server.
    Express,
    /// Vue.
    Vue,
    /// Angular.
    Angular,
    /// Svelte.
    Svelte,
    /// No framework qualified.
    Unknown,
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Framework::Next => "next",
            Framework::React => "react",
            Framework::Express => "express",
            Framework::Vue => "vue",
            Framework::Angular => "angular",
            Framework::Svelte => "svelte",
            Framework::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Broad application shape derived from the detected framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppType {
    /// Browser-facing application.
    WebApp,
    /// Headless API server.
    ApiServer,
    /// Could not be classified.
    Unknown,
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AppType::WebApp => "web-app",
            AppType::ApiServer => "api-server",
            AppType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// An HTTP route discovered in the scanned tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRoute {
    /// Upper-case HTTP method (`GET`, `POST`, ...).
    pub method: String,
    /// Route path (e.g. `/api/users`).
    pub path: String,
    /// File the route was found in, relative to the scanned root.
    pub source_file: String,
    /// Framework the route idiom belongs to.
    pub framework: Framework,
}

/// Which ORM idiom produced a model finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrmKind {
    /// `mongoose.model('Name', schema)` call.
    Mongoose,
    /// `model Name { ... }` block in a Prisma schema.
    Prisma,
}

/// A data model discovered in the scanned tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataModel {
    /// Model name as declared.
    pub name: String,
    /// Explicit collection name, when the declaration pins one.
    pub collection: Option<String>,
    /// File the model was found in, relative to the scanned root.
    pub source_file: String,
    /// Which ORM idiom matched.
    pub orm: OrmKind,
}

/// A UI-layer symbol discovered in the scanned tree.
///
/// Any exported top-level declaration with an upper-case identifier
/// qualifies; uppercase config constants are a known false positive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Exported identifier.
    pub name: String,
    /// File the component was found in, relative to the scanned root.
    pub source_file: String,
}

/// The platform concern an integration point links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationKind {
    /// Session/auth wiring is needed here.
    Auth,
    /// Shared database conventions apply here.
    Database,
    /// Platform branding belongs here.
    Branding,
}

impl fmt::Display for IntegrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntegrationKind::Auth => "auth",
            IntegrationKind::Database => "database",
            IntegrationKind::Branding => "branding",
        };
        f.write_str(name)
    }
}

/// A derived suggestion linking a discovered code location to a required
/// platform-integration concern. Reporting only; never fed back into
/// detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationPoint {
    /// Which concern applies.
    pub kind: IntegrationKind,
    /// File the suggestion points at, relative to the scanned root.
    pub source_file: String,
    /// Why this location was flagged.
    pub rationale: String,
}

/// Caller preferences consumed by both generation strategies.
///
/// The free-form strings pass through to templates and oracle prompts
/// verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    /// Emit session middleware.
    pub add_auth: bool,
    /// Emit the database connector and per-model files.
    pub add_database: bool,
    /// Emit logo, navigation, and stylesheet artifacts.
    pub add_branding: bool,
    /// Display name for the embedded app.
    pub app_name: String,
    /// Short description shown on the landing page.
    pub description: String,
    /// Platform catalog category.
    pub category: String,
}

/// The structured result of scanning a source tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppModel {
    /// Detected framework, or `Unknown`.
    pub framework: Framework,
    /// Derived application shape.
    pub app_type: AppType,
    /// Merged runtime + dev dependencies from the manifest.
    pub dependencies: BTreeMap<String, String>,
    /// Discovered HTTP routes, in walk order. Duplicates allowed.
    pub api_routes: Vec<ApiRoute>,
    /// Discovered data models, in walk order. No cross-idiom dedup.
    pub models: Vec<DataModel>,
    /// Discovered UI components, in walk order.
    pub components: Vec<Component>,
    /// Whether auth signals were found (dependencies or paths).
    pub has_auth: bool,
    /// Whether database signals were found (dependencies or paths).
    pub has_database: bool,
    /// Derived integration-point suggestions.
    pub integration_points: Vec<IntegrationPoint>,
    /// When the scan completed.
    pub scanned_at: DateTime<Utc>,
}

impl AppModel {
    /// Structural equality, ignoring the scan timestamp.
    ///
    /// Scanning the same unchanged tree twice yields models that are
    /// equal under this comparison even though `scanned_at` differs.
    #[must_use]
    pub fn same_shape(&self, other: &AppModel) -> bool {
        self.framework == other.framework
            && self.app_type == other.app_type
            && self.dependencies == other.dependencies
            && self.api_routes == other.api_routes
            && self.models == other.models
            && self.components == other.components
            && self.has_auth == other.has_auth
            && self.has_database == other.has_database
            && self.integration_points == other.integration_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> AppModel {
        AppModel {
            framework: Framework::Express,
            app_type: AppType::ApiServer,
            dependencies: BTreeMap::from([("express".to_string(), "^4.18.0".to_string())]),
            api_routes: vec![ApiRoute {
                method: "GET".into(),
                path: "/api/users".into(),
                source_file: "routes/users.js".into(),
                framework: Framework::Express,
            }],
            models: vec![],
            components: vec![],
            has_auth: false,
            has_database: false,
            integration_points: vec![],
            scanned_at: Utc::now(),
        }
    }

    #[test]
    fn same_shape_ignores_timestamp() {
        let a = sample_model();
        let mut b = a.clone();
        b.scanned_at = Utc::now() + chrono::Duration::seconds(30);
        assert!(a.same_shape(&b));
    }

    #[test]
    fn same_shape_detects_route_difference() {
        let a = sample_model();
        let mut b = a.clone();
        b.api_routes.clear();
        assert!(!a.same_shape(&b));
    }

    #[test]
    fn yaml_round_trip_preserves_shape() {
        let model = sample_model();
        let yaml = serde_yaml::to_string(&model).unwrap();
        let parsed: AppModel = serde_yaml::from_str(&yaml).unwrap();
        assert!(model.same_shape(&parsed));
    }

    #[test]
    fn framework_serializes_lowercase() {
        let yaml = serde_yaml::to_string(&Framework::Next).unwrap();
        assert_eq!(yaml.trim(), "next");
    }

    #[test]
    fn app_type_displays_kebab_case() {
        assert_eq!(AppType::WebApp.to_string(), "web-app");
        assert_eq!(AppType::ApiServer.to_string(), "api-server");
    }
}
