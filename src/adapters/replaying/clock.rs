//! Replaying adapter for the `Clock` port.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Serves recorded timestamps from a cassette.
pub struct ReplayingClock {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingClock {
    /// Creates a replaying clock backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<Utc> {
        let output = {
            let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
            let interaction = replayer.next_interaction("clock", "now");
            interaction.output.clone()
        };
        let text = output.as_str().expect("clock::now: expected string output");
        text.parse().expect("clock::now: expected RFC 3339 timestamp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use serde_json::json;

    #[test]
    fn replaying_clock_serves_recorded_time() {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            interactions: vec![Interaction {
                seq: 0,
                port: "clock".into(),
                method: "now".into(),
                input: json!({}),
                output: json!("2025-06-15T10:00:00Z"),
            }],
        };
        let clock = ReplayingClock::new(CassetteReplayer::new(&cassette));
        assert_eq!(clock.now().to_rfc3339(), "2025-06-15T10:00:00+00:00");
    }
}
