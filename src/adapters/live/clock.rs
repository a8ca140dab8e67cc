//! Wall-clock time for record timestamps and default join dates.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Reads `Utc::now()`.
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_system_time() {
        let before = Utc::now();
        let now = LiveClock.now();
        assert!(now >= before);
        assert!(now <= Utc::now());
    }
}
