use std::time::Duration;

use crate::clock::Clock;

/// Wall clock time, sleeping on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        chrono::Utc::now().timestamp().max(0) as u64
    }

    async fn sleep_until(&self, deadline: u64) {
        let now = self.now();
        if deadline > now {
            tokio::time::sleep(Duration::from_secs(deadline - now)).await;
        }
    }
}
