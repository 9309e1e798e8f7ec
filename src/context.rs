//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::live::{LiveClock, LiveFileSystem, LiveLlmClient};
use crate::adapters::replaying::{ReplayingClock, ReplayingFileSystem, ReplayingLlmClient};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::llm::LlmClient;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, replaying).
pub struct ServiceContext {
    /// Clock for obtaining the current time.
    pub clock: Box<dyn Clock>,
    /// Filesystem for file I/O and tree walks.
    pub fs: Box<dyn FileSystem>,
    /// LLM client for the code-transformation oracle.
    pub llm: Box<dyn LlmClient>,
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext").finish_non_exhaustive()
    }
}

impl ServiceContext {
    /// Creates a live context with real adapters for clock, filesystem,
    /// and the Anthropic API.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            llm: Box::new(LiveLlmClient::new()),
        }
    }

    /// Creates a replaying context from a cassette file.
    ///
    /// All ports are served by a single cassette — each port/method pair
    /// is dispatched to the right interaction stream automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: crate::cassette::format::Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(Self::replaying_from(&cassette))
    }

    /// Creates a replaying context from an already-loaded cassette.
    ///
    /// Each port gets its own replayer from the same cassette so that
    /// per-port cursors are independent.
    #[must_use]
    pub fn replaying_from(cassette: &crate::cassette::format::Cassette) -> Self {
        Self {
            clock: Box::new(ReplayingClock::new(CassetteReplayer::new(cassette))),
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(cassette))),
            llm: Box::new(ReplayingLlmClient::new(CassetteReplayer::new(cassette))),
        }
    }
}
