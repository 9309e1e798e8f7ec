//! `berth rewrite` command.

use std::path::Path;

use crate::context::ServiceContext;
use crate::generate::{ArtifactKind, GeneratedFile};
use crate::model::Preferences;
use crate::mutate::{MutationEngine, MutationReport};
use crate::scan::Scanner;
use crate::verify::verify;

/// Execute the `rewrite` command.
///
/// Scans the app, lets the oracle plan and apply in-place edits (with
/// `.bak` backups for pre-existing files), then verifies the files that
/// changed. Requires `ANTHROPIC_API_KEY` in the environment or `.env`.
///
/// # Errors
///
/// Returns an error string when scanning fails or the oracle is
/// unreachable. Per-file failures are reported in the change list, not
/// as command failure.
pub fn run(ctx: &ServiceContext, app_root: &Path, prefs: &Preferences) -> Result<(), String> {
    let scanner = Scanner::new();
    let model = scanner.scan(ctx, app_root).map_err(|e| e.to_string())?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to start runtime: {e}"))?;

    let engine = MutationEngine::new();
    let report = runtime
        .block_on(engine.mutate(ctx, app_root, &model, prefs))
        .map_err(|e| e.to_string())?;

    print_report(&report);

    let changed = changed_files(&report);
    if !changed.is_empty() {
        let verification = verify(ctx, app_root, &changed);
        println!();
        println!(
            "Verification: {}/{} checks passed",
            verification.passed, verification.total
        );
        for error in &verification.errors {
            println!("  FAIL {error}");
        }
    }

    Ok(())
}

fn print_report(report: &MutationReport) {
    if report.changes.is_empty() {
        println!("The oracle proposed no edits; nothing was changed.");
        return;
    }
    println!(
        "Applied {}/{} edits (backups written as <file>.bak):",
        report.succeeded(),
        report.changes.len()
    );
    for change in &report.changes {
        if change.success {
            println!("  ok   {}", change.file);
        } else {
            println!(
                "  FAIL {}: {}",
                change.file,
                change.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
}

/// Maps successful changes to verifiable file entries, inferring each
/// artifact kind from its path.
fn changed_files(report: &MutationReport) -> Vec<GeneratedFile> {
    report
        .changes
        .iter()
        .filter(|c| c.success)
        .map(|c| GeneratedFile {
            kind: ArtifactKind::from_path(&c.file),
            path: c.file.clone(),
            description: "rewritten in place".to_string(),
        })
        .collect()
}
