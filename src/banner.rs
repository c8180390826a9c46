//! Hero banner rotation
//!
//! Advances the featured banner on a fixed period while the Home screen is in
//! the foreground. Stopped rotations do not accumulate time.

use std::time::Duration;

/// Auto-advancing index over the featured items
#[derive(Debug, Clone)]
pub struct BannerRotation {
    interval: Duration,
    elapsed: Duration,
    index: usize,
    len: usize,
    running: bool,
}

impl BannerRotation {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            index: 0,
            len: 0,
            running: false,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run over `len` featured items. An empty banner never runs.
    pub fn start(&mut self, len: usize) {
        if len != self.len {
            self.len = len;
            if self.index >= len {
                self.index = 0;
            }
        }
        if len == 0 {
            self.stop();
            return;
        }
        if !self.running {
            tracing::debug!(len, "banner rotation started");
            self.running = true;
            self.elapsed = Duration::ZERO;
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!("banner rotation stopped");
        }
        self.running = false;
        self.elapsed = Duration::ZERO;
    }

    /// Featured list was replaced; start over from the first item
    pub fn reset(&mut self, len: usize) {
        self.index = 0;
        self.elapsed = Duration::ZERO;
        self.len = len;
        if len == 0 {
            self.stop();
        }
    }

    /// Advance by `elapsed`. Returns whether the banner moved.
    pub fn tick_with_elapsed(&mut self, elapsed: Duration) -> bool {
        if !self.running || self.len == 0 || self.interval.is_zero() {
            return false;
        }
        self.elapsed += elapsed;
        let mut advanced = false;
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            self.index = (self.index + 1) % self.len;
            advanced = true;
        }
        advanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advances_every_interval_and_wraps() {
        let mut banner = BannerRotation::new(Duration::from_secs(5));
        banner.start(3);

        assert!(!banner.tick_with_elapsed(Duration::from_secs(4)));
        assert!(banner.tick_with_elapsed(Duration::from_secs(1)));
        assert_eq!(banner.index(), 1);

        banner.tick_with_elapsed(Duration::from_secs(10));
        assert_eq!(banner.index(), 0);
    }

    #[test]
    fn test_stopped_banner_does_not_advance() {
        let mut banner = BannerRotation::new(Duration::from_secs(5));
        banner.start(3);
        banner.stop();
        assert!(!banner.tick_with_elapsed(Duration::from_secs(30)));
        assert_eq!(banner.index(), 0);
    }

    #[test]
    fn test_empty_banner_never_runs() {
        let mut banner = BannerRotation::new(Duration::from_secs(5));
        banner.start(0);
        assert!(!banner.is_running());
        assert!(!banner.tick_with_elapsed(Duration::from_secs(5)));
    }

    #[test]
    fn test_restart_does_not_carry_elapsed() {
        let mut banner = BannerRotation::new(Duration::from_secs(5));
        banner.start(2);
        banner.tick_with_elapsed(Duration::from_secs(4));
        banner.stop();
        banner.start(2);
        assert!(!banner.tick_with_elapsed(Duration::from_secs(4)));
        assert_eq!(banner.index(), 0);
    }

    #[test]
    fn test_shrinking_list_clamps_index() {
        let mut banner = BannerRotation::new(Duration::from_secs(1));
        banner.start(5);
        banner.tick_with_elapsed(Duration::from_secs(4));
        assert_eq!(banner.index(), 4);
        banner.start(2);
        assert_eq!(banner.index(), 0);
    }
}
