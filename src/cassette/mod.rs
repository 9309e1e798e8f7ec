//! Cassette-based record/replay support for port interactions.
//!
//! Cassettes are hand-authored (or captured) YAML files listing the
//! interactions a test run expects at each port. Replaying adapters in
//! `crate::adapters::replaying` serve these interactions in order, which
//! keeps oracle- and filesystem-dependent pipeline logic deterministic
//! under test.

pub mod format;
pub mod replayer;
