use std::time::Duration;

use instant::Instant;


pub const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(5);

#[must_use]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeepaliveOutcome {
    // Action. None required.
    AllGood,

    // A full interval has passed since the previous beat.
    // Action. Send a keepalive message. `Keepalive` assumes that the message is sent when this is
    // returned.
    SendBeat,
}

// Fixed-period liveness signal. Unlike a heartbeat it doesn't look at other traffic: the server
// expects a beat every interval regardless of how busy the connection is.
//
// Exists only while the connection is open, so dropping it is what stops the beats.
#[derive(Debug)]
pub struct Keepalive {
    latest_beat: Instant,
}

impl Keepalive {
    pub fn new(now: Instant) -> Self { Keepalive { latest_beat: now } }

    pub fn latest_beat(&self) -> Instant { self.latest_beat }

    pub fn beat(&mut self, now: Instant) -> KeepaliveOutcome {
        if now.saturating_duration_since(self.latest_beat) >= KEEPALIVE_INTERVAL {
            // Keep the phase rather than drifting by the tick granularity.
            let elapsed_periods = now.saturating_duration_since(self.latest_beat).as_millis()
                / KEEPALIVE_INTERVAL.as_millis();
            self.latest_beat += KEEPALIVE_INTERVAL * elapsed_periods as u32;
            KeepaliveOutcome::SendBeat
        } else {
            KeepaliveOutcome::AllGood
        }
    }
}
