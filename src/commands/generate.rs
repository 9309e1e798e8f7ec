//! `berth generate` command.

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::generate::generate;
use crate::model::Preferences;
use crate::scan::Scanner;
use crate::verify::verify;

/// Execute the `generate` command.
///
/// Scans the app, renders the artifact pipeline into an isolated output
/// root, then verifies what was produced. The scanned tree itself is
/// never written to.
///
/// # Errors
///
/// Returns an error string when scanning or generation fails. Verifier
/// failures are reported, not fatal; the operator reviews them.
pub fn run(
    ctx: &ServiceContext,
    app_root: &Path,
    output: Option<&Path>,
    prefs: &Preferences,
) -> Result<(), String> {
    let scanner = Scanner::new();
    let model = scanner.scan(ctx, app_root).map_err(|e| e.to_string())?;

    let output_root =
        output.map_or_else(|| default_output_root(app_root), Path::to_path_buf);

    let files = generate(ctx, &model, prefs, &output_root).map_err(|e| e.to_string())?;

    println!("Generated {} artifacts under {}:", files.len(), output_root.display());
    for file in &files {
        println!("  [{}] {}: {}", file.kind, file.path, file.description);
    }

    let report = verify(ctx, &output_root, &files);
    println!();
    println!("Verification: {}/{} checks passed", report.passed, report.total);
    for error in &report.errors {
        println!("  FAIL {error}");
    }

    Ok(())
}

/// Default output root: a `<app>-integration` sibling of the app tree.
fn default_output_root(app_root: &Path) -> PathBuf {
    let name = app_root
        .file_name()
        .map_or_else(|| "app".to_string(), |n| n.to_string_lossy().to_string());
    app_root.with_file_name(format!("{name}-integration"))
}
