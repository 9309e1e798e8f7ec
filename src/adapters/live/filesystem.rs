//! Live filesystem adapter using `std::fs` and `walkdir`.

use std::path::Path;

use walkdir::WalkDir;

use crate::ports::filesystem::FileSystem;

/// Directories excluded from tree walks. These hold dependencies or build
/// output, never app source.
const SKIPPED_DIRS: &[&str] = &["node_modules", ".git", "dist", "build", ".next", "coverage"];

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn copy(
        &self,
        from: &Path,
        to: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(from, to)?;
        Ok(())
    }

    fn walk(&self, root: &Path) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        if !root.is_dir() {
            return Err(format!("not a directory: {}", root.display()).into());
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
            entry.file_name().to_str().map_or(true, |name| !SKIPPED_DIRS.contains(&name))
        });

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(rel) = entry.path().strip_prefix(root) {
                let rel = rel
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                files.push(rel);
            }
        }

        files.sort();
        Ok(files)
    }
}
