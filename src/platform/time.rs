//! Frame pacing for the fixed-timestep loop

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Longest single sleep, so a shutdown request is noticed quickly
const SLEEP_SLICE: Duration = Duration::from_millis(4);

/// Gates the loop to a target tick rate
#[derive(Debug)]
pub struct FramePacer {
    budget: Duration,
    deadline: Instant,
}

impl FramePacer {
    /// `fps` must be non-zero (validated with the settings)
    pub fn new(fps: u32) -> Self {
        let budget = Duration::from_secs(1) / fps.max(1);
        Self {
            budget,
            deadline: Instant::now() + budget,
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Sleep until the next tick is due.
    ///
    /// Returns false if `cancel` was raised while waiting.
    pub fn wait(&mut self, cancel: &AtomicBool) -> bool {
        loop {
            if cancel.load(Ordering::Relaxed) {
                return false;
            }
            let now = Instant::now();
            if now >= self.deadline {
                break;
            }
            thread::sleep((self.deadline - now).min(SLEEP_SLICE));
        }

        self.deadline += self.budget;
        let now = Instant::now();
        // Fell more than a frame behind: don't try to catch up
        if now > self.deadline {
            log::trace!("frame overran budget by {:?}", now - self.deadline);
            self.deadline = now + self.budget;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_from_fps() {
        let pacer = FramePacer::new(32);
        assert_eq!(pacer.budget(), Duration::from_micros(31_250));
    }

    #[test]
    fn test_wait_sleeps_roughly_one_frame() {
        let cancel = AtomicBool::new(false);
        let mut pacer = FramePacer::new(100);
        let start = Instant::now();
        assert!(pacer.wait(&cancel));
        assert!(start.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_cancelled_wait_returns_immediately() {
        let cancel = AtomicBool::new(true);
        let mut pacer = FramePacer::new(1);
        let start = Instant::now();
        assert!(!pacer.wait(&cancel));
        assert!(start.elapsed() < Duration::from_millis(500));
    }
}
