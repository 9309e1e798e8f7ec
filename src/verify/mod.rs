//! Shallow post-generation checks over produced artifacts.
//!
//! The verifier never executes the target app. Checks are deterministic
//! surface inspections: files exist and are non-empty, script files show
//! a declaration keyword, manifest-like files parse, and known artifacts
//! carry their conventional markers. Every check is scored
//! independently; a failure never aborts the batch.

use std::path::Path;

use serde::Serialize;

use crate::context::ServiceContext;
use crate::generate::{ArtifactKind, GeneratedFile};

/// Script-file keywords; one of these must appear for the surface check.
const DECLARATION_KEYWORDS: &[&str] =
    &["function", "const", "let", "class", "export", "module.exports"];

/// Aggregate pass/fail result of a verification run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TestReport {
    /// Checks that passed.
    pub passed: usize,
    /// Checks that failed.
    pub failed: usize,
    /// Total checks scored.
    pub total: usize,
    /// One message per failed check.
    pub errors: Vec<String>,
}

impl TestReport {
    fn record(&mut self, passed: bool, failure_message: String) {
        self.total += 1;
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
            self.errors.push(failure_message);
        }
    }

    /// `true` when every check passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Runs the fixed check battery over `files` relative to `root`.
#[must_use]
pub fn verify(ctx: &ServiceContext, root: &Path, files: &[GeneratedFile]) -> TestReport {
    let mut report = TestReport::default();

    for file in files {
        let full_path = root.join(&file.path);

        // Existence and non-zero size. When the file cannot be read, the
        // remaining checks for it are unscoreable and skipped.
        let content = ctx.fs.read_to_string(&full_path).ok().filter(|c| !c.is_empty());
        report.record(
            content.is_some(),
            format!("{}: missing or empty", file.path),
        );
        let Some(content) = content else {
            continue;
        };

        if is_script_path(&file.path) {
            report.record(
                DECLARATION_KEYWORDS.iter().any(|kw| content.contains(kw)),
                format!("{}: no declaration keyword found", file.path),
            );
        } else if file.path.ends_with(".json") {
            report.record(
                serde_json::from_str::<serde_json::Value>(&content).is_ok(),
                format!("{}: not valid JSON", file.path),
            );
        }

        if let Some(markers) = required_markers(file.kind) {
            let missing: Vec<&str> =
                markers.iter().filter(|m| !content.contains(*m)).copied().collect();
            report.record(
                missing.is_empty(),
                format!("{}: missing required markers: {}", file.path, missing.join(", ")),
            );
        }
    }

    report
}

fn is_script_path(path: &str) -> bool {
    path.rsplit('.')
        .next()
        .is_some_and(|ext| ["js", "jsx", "ts", "tsx", "mjs", "cjs"].contains(&ext))
}

/// Conventional markers each known artifact must mention.
fn required_markers(kind: ArtifactKind) -> Option<&'static [&'static str]> {
    match kind {
        ArtifactKind::SessionMiddleware => Some(&["express-session", "requirePlatformSession"]),
        ArtifactKind::DatabaseConnector => Some(&["mongoose", "platformFields"]),
        ArtifactKind::ProxyRoute => Some(&["req", "fetch"]),
        ArtifactKind::EnvConfig => Some(&["SESSION_SECRET", "MONGODB_URI", "APP_PORT"]),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{generate, ArtifactKind, GeneratedFile};
    use crate::model::{AppModel, AppType, Framework, Preferences};
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn sample_model() -> AppModel {
        AppModel {
            framework: Framework::Express,
            app_type: AppType::ApiServer,
            dependencies: BTreeMap::new(),
            api_routes: vec![],
            models: vec![],
            components: vec![],
            has_auth: false,
            has_database: false,
            integration_points: vec![],
            scanned_at: Utc::now(),
        }
    }

    fn temp_root(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn freshly_generated_artifacts_all_pass() {
        let root = temp_root("berth_verify_clean");
        let ctx = ServiceContext::live();
        let prefs = Preferences {
            add_auth: true,
            add_database: true,
            add_branding: true,
            app_name: "Shop".into(),
            description: "A shop".into(),
            category: "commerce".into(),
        };

        let files = generate(&ctx, &sample_model(), &prefs, &root).unwrap();
        let report = verify(&ctx, &root, &files);

        assert!(report.all_passed(), "unexpected failures: {:?}", report.errors);
        assert_eq!(report.total, report.passed);

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn missing_session_marker_fails_exactly_one_check() {
        let root = temp_root("berth_verify_marker");
        let ctx = ServiceContext::live();
        // A session middleware that forgot the mechanism but is otherwise
        // a plausible script file.
        std::fs::create_dir_all(root.join("middleware")).unwrap();
        std::fs::write(
            root.join("middleware/session.js"),
            "function requirePlatformSession(req, res, next) { next(); }\nmodule.exports = {};\n",
        )
        .unwrap();

        let files = vec![GeneratedFile {
            kind: ArtifactKind::SessionMiddleware,
            path: "middleware/session.js".into(),
            description: "session middleware".into(),
        }];
        let report = verify(&ctx, &root, &files);

        // Existence and surface checks pass; the marker check fails once.
        assert_eq!(report.failed, 1);
        assert_eq!(report.passed, 2);
        assert!(report.errors[0].contains("express-session"));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn missing_file_fails_existence_and_skips_the_rest() {
        let root = temp_root("berth_verify_missing");
        let ctx = ServiceContext::live();

        let files = vec![GeneratedFile {
            kind: ArtifactKind::ProxyRoute,
            path: "routes/proxy.js".into(),
            description: "proxy".into(),
        }];
        let report = verify(&ctx, &root, &files);

        assert_eq!(report.total, 1);
        assert_eq!(report.failed, 1);
        assert!(report.errors[0].contains("missing or empty"));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn corrupt_manifest_patch_fails_json_surface_check() {
        let root = temp_root("berth_verify_json");
        let ctx = ServiceContext::live();
        std::fs::write(root.join("package.platform.json"), "{broken").unwrap();

        let files = vec![GeneratedFile {
            kind: ArtifactKind::ManifestPatch,
            path: "package.platform.json".into(),
            description: "patch".into(),
        }];
        let report = verify(&ctx, &root, &files);

        assert_eq!(report.failed, 1);
        assert!(report.errors[0].contains("not valid JSON"));

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn one_failure_never_aborts_the_batch() {
        let root = temp_root("berth_verify_batch");
        let ctx = ServiceContext::live();
        std::fs::create_dir_all(root.join("routes")).unwrap();
        std::fs::write(
            root.join("routes/proxy.js"),
            "const router = 1; // req fetch\nmodule.exports = router;\n",
        )
        .unwrap();

        let files = vec![
            GeneratedFile {
                kind: ArtifactKind::EnvConfig,
                path: ".env.integration".into(),
                description: "missing on disk".into(),
            },
            GeneratedFile {
                kind: ArtifactKind::ProxyRoute,
                path: "routes/proxy.js".into(),
                description: "proxy".into(),
            },
        ];
        let report = verify(&ctx, &root, &files);

        // The missing env file contributes one failure; the proxy file
        // still gets its full set of checks.
        assert_eq!(report.failed, 1);
        assert_eq!(report.passed, 3);
        assert_eq!(report.total, 4);

        let _ = std::fs::remove_dir_all(&root);
    }
}
