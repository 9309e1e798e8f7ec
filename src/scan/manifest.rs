//! Dependency-manifest (`package.json`) parsing.

use std::collections::BTreeMap;

use serde::Deserialize;

/// The subset of `package.json` the scanner cares about.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    /// Declared package name.
    #[serde(default)]
    pub name: Option<String>,
    /// Runtime dependencies.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    /// Development dependencies.
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Parses manifest JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error when the content is not
    /// valid JSON for this shape.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Runtime and dev dependencies merged into one map.
    ///
    /// On a name collision the runtime entry wins.
    #[must_use]
    pub fn merged_dependencies(&self) -> BTreeMap<String, String> {
        let mut merged = self.dev_dependencies.clone();
        merged.extend(self.dependencies.clone());
        merged
    }
}
