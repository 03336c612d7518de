//! Playback options.

use std::time::Duration;

/// Tunables for a playback session.
///
/// Setters ignore invalid values and keep the default in place, so callers
/// can pass user input through unchecked.
///
/// ```
/// use std::time::Duration;
/// use castplay::Options;
///
/// let options = Options::default()
///     .speed(2.0)
///     .max_wait(Duration::from_secs(1));
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    pub(super) max_wait: Duration,
    pub(super) speed: f64,
    pub(super) ignore_size_check: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_wait: Duration::ZERO,
            speed: 1.0,
            ignore_size_check: false,
        }
    }
}

impl Options {
    /// Cap on the wait between frames. Zero leaves the cap unset.
    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        if !max_wait.is_zero() {
            self.max_wait = max_wait;
        }
        self
    }

    /// Playback speed multiplier. Values above 1 speed playback up, values
    /// between 0 and 1 slow it down; zero and below are ignored.
    pub fn speed(mut self, speed: f64) -> Self {
        if speed > 0.0 {
            self.speed = speed;
        }
        self
    }

    /// Skip the check that the recording fits the terminal.
    pub fn ignore_size_check(mut self) -> Self {
        self.ignore_size_check = true;
        self
    }

    /// Effective wait cap: an explicit max wait wins, otherwise the
    /// recording's own idle time limit applies when present.
    pub(super) fn wait_cap(&self, idle_time_limit: Option<f64>) -> Option<Duration> {
        if !self.max_wait.is_zero() {
            return Some(self.max_wait);
        }

        idle_time_limit
            .filter(|limit| *limit > 0.0)
            .map(Duration::from_secs_f64)
    }
}
