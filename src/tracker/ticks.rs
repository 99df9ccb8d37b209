use std::time::Duration;

use futures::{stream, Stream};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Periodic tick source for `Tracker::time_elapsed`.
///
/// The first tick fires immediately. Missed ticks are skipped rather than
/// bursted, so a stalled consumer never sees a flood of stale samples.
pub fn interval_ticks(period: Duration) -> impl Stream<Item = Instant> + Send + 'static {
    // The interval is built on first poll; creating it needs a running runtime.
    stream::unfold(None, move |state: Option<Interval>| async move {
        let mut interval = state.unwrap_or_else(|| {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });
        let tick = interval.tick().await;
        Some((tick, Some(interval)))
    })
}
