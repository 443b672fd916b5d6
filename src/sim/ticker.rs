use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::incremental::SharedSimulation;

/// Fixed-cadence driver for an [`IncrementalSimulation`].
///
/// One background thread calls `tick()` once per period while holding the
/// simulation lock, so ticks never overlap and a step is never observed half
/// done. Stopping the ticker leaves the simulation as it was after the last
/// tick.
///
/// [`IncrementalSimulation`]: super::IncrementalSimulation
#[derive(Debug)]
pub struct Ticker {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<u64>>,
}

impl Ticker {
    /// Tick `sim` every `period` until [`stop`](Ticker::stop) is called.
    pub fn spawn(sim: SharedSimulation, period: Duration) -> io::Result<Self> {
        Self::spawn_inner(sim, period, None)
    }

    /// Tick `sim` every `period`, at most `limit` times.
    pub fn spawn_limited(sim: SharedSimulation, period: Duration, limit: u64) -> io::Result<Self> {
        Self::spawn_inner(sim, period, Some(limit))
    }

    fn spawn_inner(sim: SharedSimulation, period: Duration, limit: Option<u64>) -> io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);

        let handle = thread::Builder::new()
            .name("sim-ticker".into())
            .spawn(move || tick_loop(&sim, period, limit, &flag))?;

        debug!(?period, ?limit, "ticker started");
        Ok(Self { stop, handle: Some(handle) })
    }

    /// Stop ticking and return the number of ticks delivered.
    pub fn stop(mut self) -> u64 {
        self.stop.store(true, Ordering::Release);
        self.join()
    }

    /// Wait for a limited ticker to deliver all of its ticks.
    ///
    /// Blocks forever on a ticker created with [`spawn`](Ticker::spawn).
    pub fn wait(mut self) -> u64 {
        self.join()
    }

    fn join(&mut self) -> u64 {
        match self.handle.take().map(JoinHandle::join) {
            Some(Ok(ticks)) => {
                debug!(ticks, "ticker stopped");
                ticks
            }
            Some(Err(_)) => {
                warn!("ticker thread panicked");
                0
            }
            None => 0,
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        self.join();
    }
}

fn tick_loop(sim: &SharedSimulation, period: Duration, limit: Option<u64>, stop: &AtomicBool) -> u64 {
    let mut ticks = 0u64;
    let mut deadline = Instant::now() + period;

    while !stop.load(Ordering::Acquire) && limit.is_none_or(|n| ticks < n) {
        sim.lock().tick();
        ticks += 1;

        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
            deadline += period;
        } else {
            // Overran the period; restart the schedule instead of bursting.
            deadline = now + period;
        }
    }

    ticks
}
