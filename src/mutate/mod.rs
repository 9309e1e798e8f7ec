//! AI-assisted mutation engine: edits the scanned app tree in place.
//!
//! The oracle plans a set of per-file edits, then rewrites each file in
//! a second round trip. Every pre-existing target is copied to a
//! `<path>.bak` sibling before being overwritten; backups are the sole
//! rollback mechanism; there is no transaction log. Two oracle calls per
//! file means wall-clock cost scales linearly with file count; that is a
//! known property of the design, not an accident.
//!
//! Concurrent mutation of one tree is unsupported: nothing locks the
//! target, and interleaved backups would clobber each other.

pub mod directive;
pub mod platform;

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::context::ServiceContext;
use crate::model::{AppModel, Preferences};
use crate::ports::llm::CompletionRequest;
use directive::{parse_directives, EditDirective};

/// Oracle model used for both planning and rewriting.
const ORACLE_MODEL: &str = "claude-sonnet-4-20250514";
/// Low temperature: code transformation wants determinism-leaning output.
const ORACLE_TEMPERATURE: f32 = 0.2;
const PLAN_MAX_TOKENS: u32 = 2048;
const REWRITE_MAX_TOKENS: u32 = 8192;

/// Batch-aborting mutation failures.
///
/// Per-file problems never surface here; they are recorded in the
/// [`MutationReport`] instead.
#[derive(Debug, Error)]
pub enum MutateError {
    /// The planning call failed at the transport or auth layer. Nothing
    /// was written.
    #[error("oracle unreachable: {0}")]
    OracleUnreachable(String),
}

/// Outcome of one edit directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    /// Target path, relative to the app root.
    pub file: String,
    /// Whether the rewrite landed on disk.
    pub success: bool,
    /// Failure detail when `success` is false.
    pub error: Option<String>,
}

/// Aggregate result of one mutation run.
#[derive(Debug, Clone, Serialize)]
pub struct MutationReport {
    /// One entry per directive, in plan order.
    pub changes: Vec<FileChange>,
    /// When the run finished.
    pub completed_at: DateTime<Utc>,
}

impl MutationReport {
    /// Number of directives that landed.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.changes.iter().filter(|c| c.success).count()
    }

    /// Number of directives that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.changes.len() - self.succeeded()
    }
}

/// Drives the two-phase oracle protocol against an app tree.
///
/// The platform context and oracle model are immutable configuration
/// fixed at construction.
pub struct MutationEngine {
    platform_context: &'static str,
    oracle_model: &'static str,
}

impl MutationEngine {
    /// Creates an engine with the fixed platform context.
    #[must_use]
    pub fn new() -> Self {
        Self { platform_context: platform::PLATFORM_CONTEXT, oracle_model: ORACLE_MODEL }
    }

    /// Plans and applies in-place edits under `app_root`.
    ///
    /// A plan response with no `File:` markers is a successful run with
    /// an empty change set. Per-file failures are isolated: each
    /// directive gets its own [`FileChange`] entry and one failure never
    /// aborts the rest.
    ///
    /// # Errors
    ///
    /// Returns [`MutateError::OracleUnreachable`] when the planning call
    /// fails; nothing has been written at that point.
    pub async fn mutate(
        &self,
        ctx: &ServiceContext,
        app_root: &Path,
        model: &AppModel,
        prefs: &Preferences,
    ) -> Result<MutationReport, MutateError> {
        let plan_request = CompletionRequest {
            model: self.oracle_model.to_string(),
            prompt: self.build_plan_prompt(model, prefs),
            max_tokens: PLAN_MAX_TOKENS,
            temperature: ORACLE_TEMPERATURE,
        };

        let plan = ctx
            .llm
            .complete(&plan_request)
            .await
            .map_err(|e| MutateError::OracleUnreachable(e.to_string()))?;

        let directives = parse_directives(&plan.text);
        if directives.is_empty() {
            debug!("plan response contained no directives");
        }

        let mut changes = Vec::with_capacity(directives.len());
        for directive in &directives {
            let change = self.apply_directive(ctx, app_root, directive).await;
            if let Some(error) = &change.error {
                warn!(file = %change.file, error = %error, "directive failed");
            }
            changes.push(change);
        }

        Ok(MutationReport { changes, completed_at: ctx.clock.now() })
    }

    /// Applies a single directive: read, rewrite, back up, write.
    async fn apply_directive(
        &self,
        ctx: &ServiceContext,
        app_root: &Path,
        directive: &EditDirective,
    ) -> FileChange {
        let fail = |error: String| FileChange {
            file: directive.file_path.clone(),
            success: false,
            error: Some(error),
        };

        let target = app_root.join(&directive.file_path);
        let existed = ctx.fs.exists(&target);

        let current = if existed {
            match ctx.fs.read_to_string(&target) {
                Ok(content) => content,
                Err(e) => return fail(format!("failed to read current content: {e}")),
            }
        } else {
            String::new()
        };

        let rewrite_request = CompletionRequest {
            model: self.oracle_model.to_string(),
            prompt: self.build_rewrite_prompt(directive, &current),
            max_tokens: REWRITE_MAX_TOKENS,
            temperature: ORACLE_TEMPERATURE,
        };

        // The oracle's raw response is the replacement file, verbatim.
        let rewritten = match ctx.llm.complete(&rewrite_request).await {
            Ok(response) => response.text,
            Err(e) => return fail(format!("oracle rewrite failed: {e}")),
        };

        if existed {
            if let Err(e) = ctx.fs.copy(&target, &backup_path(&target)) {
                return fail(format!("failed to back up original: {e}"));
            }
        }

        if let Err(e) = ctx.fs.write(&target, &rewritten) {
            return fail(format!("failed to write new content: {e}"));
        }

        FileChange { file: directive.file_path.clone(), success: true, error: None }
    }

    fn build_plan_prompt(&self, model: &AppModel, prefs: &Preferences) -> String {
        let mut prompt = String::new();
        prompt.push_str(self.platform_context);
        prompt.push_str("\n## Scanned application\n\n");
        prompt.push_str(&summarize_model(model));

        let _ = writeln!(prompt, "\n## Requested integrations\n");
        let _ = writeln!(prompt, "- auth: {}", prefs.add_auth);
        let _ = writeln!(prompt, "- database: {}", prefs.add_database);
        let _ = writeln!(prompt, "- branding: {}", prefs.add_branding);
        let _ = writeln!(prompt, "- app name: {}", prefs.app_name);

        prompt.push_str(
            "\n## Instructions\n\n\
             List the files to edit so the app follows the platform conventions.\n\
             Use exactly one block per file:\n\n\
             File: relative/path/from/app/root\n\
             One or more lines describing the change.\n\n\
             Do not include code. Do not propose files outside the app tree.\n",
        );
        prompt
    }

    fn build_rewrite_prompt(&self, directive: &EditDirective, current: &str) -> String {
        let mut prompt = String::new();
        prompt.push_str(self.platform_context);
        let _ = writeln!(prompt, "\n## File to rewrite: {}\n", directive.file_path);
        if current.is_empty() {
            prompt.push_str("The file does not exist yet; produce it from scratch.\n");
        } else {
            prompt.push_str("Current content:\n\n");
            prompt.push_str(current);
            prompt.push('\n');
        }
        let _ = writeln!(prompt, "\n## Requested change\n\n{}", directive.rationale);
        prompt.push_str(
            "\nRespond with the complete new file content and nothing else: \
             no explanation, no markdown fences.\n",
        );
        prompt
    }
}

impl Default for MutationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Sibling backup path: `server.js` becomes `server.js.bak`.
fn backup_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".bak");
    PathBuf::from(os)
}

/// Compact description of the scanned model for the planning prompt.
fn summarize_model(model: &AppModel) -> String {
    let mut summary = String::new();
    let _ = writeln!(summary, "- framework: {}", model.framework);
    let _ = writeln!(summary, "- app type: {}", model.app_type);
    let _ = writeln!(summary, "- auth signals: {}", model.has_auth);
    let _ = writeln!(summary, "- database signals: {}", model.has_database);

    if !model.api_routes.is_empty() {
        let _ = writeln!(summary, "- routes:");
        for route in &model.api_routes {
            let _ = writeln!(
                summary,
                "  - {} {} ({})",
                route.method, route.path, route.source_file
            );
        }
    }
    if !model.models.is_empty() {
        let _ = writeln!(summary, "- models:");
        for data_model in &model.models {
            let _ = writeln!(summary, "  - {} ({})", data_model.name, data_model.source_file);
        }
    }
    if !model.components.is_empty() {
        let _ = writeln!(summary, "- components:");
        for component in &model.components {
            let _ = writeln!(summary, "  - {} ({})", component.name, component.source_file);
        }
    }
    summary
}
