//! Filesystem port for file I/O operations.

use std::path::Path;

/// Provides filesystem access for reading, writing, and walking trees.
///
/// Abstracting the filesystem allows deterministic replay and testing
/// without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Writes the given contents to a file, creating parent directories
    /// and overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Copies a file from `from` to `to`, overwriting any existing target.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or the target cannot
    /// be written.
    fn copy(
        &self,
        from: &Path,
        to: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Walks the tree rooted at `root` and returns relative file paths.
    ///
    /// Paths use `/` separators and are sorted. Dependency and build
    /// directories (`node_modules`, `.git`, `dist`, `build`, `.next`,
    /// `coverage`) are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is not a readable directory.
    fn walk(&self, root: &Path) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;
}
