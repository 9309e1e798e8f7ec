//! Adapter implementations for the port traits.
//!
//! `live` adapters touch the real world (disk, network); `replaying`
//! adapters serve recorded interactions from cassettes for deterministic
//! tests.

pub mod live;
pub mod replaying;
