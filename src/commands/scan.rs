//! `berth scan` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::model::AppModel;
use crate::scan::Scanner;

/// Relative path of the scan cache inside the scanned tree.
const SCAN_CACHE_PATH: &str = ".berth/app_model.yaml";

/// Execute the `scan` command.
///
/// Scans the tree, prints a human summary, and writes the model to the
/// scan cache. Other commands rescan rather than trusting the cache.
///
/// # Errors
///
/// Returns an error string when the scan fails (missing root, unparsable
/// manifest) or the cache cannot be written.
pub fn run(ctx: &ServiceContext, app_root: &Path) -> Result<(), String> {
    let scanner = Scanner::new();
    let model = scanner.scan(ctx, app_root).map_err(|e| e.to_string())?;

    print!("{}", summarize(&model));

    let yaml =
        serde_yaml::to_string(&model).map_err(|e| format!("failed to serialize scan: {e}"))?;
    let cache_path = app_root.join(SCAN_CACHE_PATH);
    ctx.fs
        .write(&cache_path, &yaml)
        .map_err(|e| format!("failed to write scan cache {}: {e}", cache_path.display()))?;

    Ok(())
}

/// Renders the human-readable scan summary.
#[must_use]
pub fn summarize(model: &AppModel) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Framework:    {}", model.framework));
    lines.push(format!("App type:     {}", model.app_type));
    lines.push(format!("Dependencies: {}", model.dependencies.len()));
    lines.push(format!(
        "Signals:      auth={} database={}",
        model.has_auth, model.has_database
    ));
    lines.push(format!(
        "Found:        {} routes, {} models, {} components",
        model.api_routes.len(),
        model.models.len(),
        model.components.len()
    ));

    if !model.integration_points.is_empty() {
        lines.push("Integration points:".to_string());
        for point in &model.integration_points {
            lines.push(format!("  [{}] {}: {}", point.kind, point.source_file, point.rationale));
        }
    }
    lines.push(String::new());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AppType, Framework, IntegrationKind, IntegrationPoint};
    use chrono::Utc;
    use std::collections::BTreeMap;

    #[test]
    fn summary_lists_counts_and_points() {
        let model = AppModel {
            framework: Framework::Express,
            app_type: AppType::ApiServer,
            dependencies: BTreeMap::from([("express".to_string(), "^4.18.0".to_string())]),
            api_routes: vec![],
            models: vec![],
            components: vec![],
            has_auth: true,
            has_database: false,
            integration_points: vec![IntegrationPoint {
                kind: IntegrationKind::Auth,
                source_file: "routes/admin.js".into(),
                rationale: "admin route".into(),
            }],
            scanned_at: Utc::now(),
        };

        let summary = summarize(&model);
        assert!(summary.contains("Framework:    express"));
        assert!(summary.contains("auth=true database=false"));
        assert!(summary.contains("[auth] routes/admin.js"));
    }

    #[test]
    fn scan_command_runs_on_a_real_tree() {
        let dir = std::env::temp_dir().join("berth_cmd_scan");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("package.json"),
            r#"{"dependencies": {"express": "^4.18.0"}}"#,
        )
        .unwrap();
        std::fs::write(dir.join("server.js"), "app.get('/api/ping', ping);\n").unwrap();

        let ctx = ServiceContext::live();
        run(&ctx, &dir).unwrap();

        assert!(dir.join(".berth/app_model.yaml").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn scan_command_reports_missing_root() {
        let ctx = ServiceContext::live();
        let result = run(&ctx, Path::new("/no/such/tree"));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("does not exist"));
    }
}
