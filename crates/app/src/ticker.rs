//! Fixed-interval tick loop.
//!
//! Holds the home lock only for the duration of one synchronous
//! [`Home::tick`](crate::home::Home::tick), never across an `.await`.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};

use crate::home::Home;
use crate::ports::{Clock, Integration};

/// Tick `home` every `period` until `shutdown` flips to `true` or its sender
/// is dropped. Returns the number of ticks performed.
pub async fn run<C, I>(
    home: Arc<Mutex<Home<C, I>>>,
    period: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> u64
where
    C: Clock,
    I: Integration,
{
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();
    let mut ticks = 0;

    tracing::info!(period_ms = period.as_millis(), "tick loop started");
    loop {
        tokio::select! {
            now = interval.tick() => {
                let elapsed = now.duration_since(last);
                last = now;
                home.lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .tick(elapsed);
                ticks += 1;
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
    tracing::info!(ticks, "tick loop stopped");
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use homesim_domain::error::HomeError;
    use homesim_domain::time::Timestamp;

    use crate::ports::SystemClock;
    use crate::registry::DeviceRegistry;

    #[derive(Default)]
    struct Idle;

    impl Integration for Idle {
        fn name(&self) -> &'static str {
            "idle"
        }

        fn setup(&mut self, _: &mut DeviceRegistry) -> Result<(), HomeError> {
            Ok(())
        }

        fn step(&mut self, _: &mut DeviceRegistry, _: Duration, _: Timestamp) -> usize {
            0
        }
    }

    #[tokio::test(start_paused = true)]
    async fn should_tick_until_shutdown() {
        let home = Arc::new(Mutex::new(Home::new(SystemClock, Idle).unwrap()));
        let (tx, rx) = watch::channel(false);

        let task = tokio::spawn(run(Arc::clone(&home), Duration::from_secs(2), rx));
        tokio::time::sleep(Duration::from_millis(6_500)).await;
        tx.send(true).unwrap();
        let ticks = task.await.unwrap();

        assert_eq!(ticks, 3);
        assert_eq!(home.lock().unwrap().tick_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn should_stop_when_sender_dropped() {
        let home = Arc::new(Mutex::new(Home::new(SystemClock, Idle).unwrap()));
        let (tx, rx) = watch::channel(false);
        drop(tx);

        let ticks = run(home, Duration::from_secs(1), rx).await;

        assert_eq!(ticks, 0);
    }
}
