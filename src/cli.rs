//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::Preferences;

/// Top-level CLI parser for `berth`.
#[derive(Debug, Parser)]
#[command(name = "berth", version, about = "Embed web apps into the host platform")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Integration preferences shared by `generate` and `rewrite`.
#[derive(Debug, Args)]
pub struct PreferenceArgs {
    /// Emit or wire up session auth.
    #[arg(long)]
    pub auth: bool,
    /// Emit or wire up the shared database conventions.
    #[arg(long)]
    pub database: bool,
    /// Emit or wire up platform branding.
    #[arg(long)]
    pub branding: bool,
    /// Display name for the embedded app.
    #[arg(long, default_value = "Embedded App")]
    pub name: String,
    /// Short description for the landing page.
    #[arg(long, default_value = "")]
    pub description: String,
    /// Platform catalog category.
    #[arg(long, default_value = "general")]
    pub category: String,
}

impl PreferenceArgs {
    /// Converts CLI flags into pipeline preferences.
    #[must_use]
    pub fn to_preferences(&self) -> Preferences {
        Preferences {
            add_auth: self.auth,
            add_database: self.database,
            add_branding: self.branding,
            app_name: self.name.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
        }
    }
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan an app tree and report its integration surface.
    Scan {
        /// Path to the app root.
        path: PathBuf,
    },
    /// Generate integration artifacts into an isolated output directory.
    Generate {
        /// Path to the app root.
        path: PathBuf,
        /// Output directory; defaults to a `<app>-integration` sibling.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Integration preferences.
        #[command(flatten)]
        prefs: PreferenceArgs,
    },
    /// Rewrite the app in place with oracle-proposed edits.
    Rewrite {
        /// Path to the app root.
        path: PathBuf,
        /// Integration preferences.
        #[command(flatten)]
        prefs: PreferenceArgs,
    },
}
