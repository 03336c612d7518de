//! Playback scheduler.
//!
//! [`Player`] consumes a [`FrameSource`], paces its output frames against
//! real time and writes them to a [`Terminal`], while a control loop running
//! on its own thread feeds pause/resume/stop signals through a sealed
//! capability. Signaling is rendezvous-channel based; the scheduling loop
//! races its frame timer against the control channels, so a pending stop is
//! always observable, paused or not.
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use castplay::{Options, OsTerminal, Player, StreamFrameSource, Terminal};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let source = StreamFrameSource::open("session.cast")?;
//! let terminal: Arc<dyn Terminal> = Arc::new(OsTerminal::new()?);
//! let options = Options::default().max_wait(Duration::from_secs(2));
//!
//! Player::new(source, terminal, options)?.play()?;
//! # Ok(())
//! # }
//! ```

mod control;
mod options;

use std::io;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{after, bounded, select, Receiver};
use thiserror::Error;
use tracing::debug;

use crate::asciicast::{FrameSource, FrameType, SourceError, FORMAT_VERSION};
use crate::terminal::Terminal;

pub use control::{ControlHandle, PlaybackControl};
pub use options::Options;

/// Playback failure.
#[derive(Debug, Error)]
pub enum PlayError {
    #[error("unexpected asciicast version {0} (supported: {FORMAT_VERSION})")]
    UnexpectedVersion(u8),

    #[error(
        "terminal too small for recording: needs {needed_width}x{needed_height}, \
         have {width}x{height}"
    )]
    TerminalTooSmall {
        needed_width: u16,
        needed_height: u16,
        width: u16,
        height: u16,
    },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("put terminal into raw mode failed: {0}")]
    RawMode(#[source] io::Error),

    #[error("frame write failed: {0}")]
    Write(#[source] io::Error),

    #[error("restore terminal failed: {0}")]
    Restore(#[source] io::Error),

    /// Playback failed and restoring the terminal failed afterwards too;
    /// both errors stay observable.
    #[error("{play}; restore terminal also failed: {restore}")]
    RestoreAfter {
        #[source]
        play: Box<PlayError>,
        restore: io::Error,
    },
}

/// Plays one recording against a terminal.
///
/// Created once, played once. Construction validates the recording against
/// the terminal and starts the terminal's control loop; [`play`](Self::play)
/// consumes the player and blocks until completion, stop or error.
pub struct Player<S> {
    source: S,
    terminal: Arc<dyn Terminal>,
    speed: f64,
    wait_cap: Option<Duration>,
    handle: ControlHandle,
    pause_rx: Receiver<()>,
    stop_rx: Receiver<()>,
}

impl<S: FrameSource> Player<S> {
    /// Validate the recording against the terminal and set up control.
    ///
    /// Fails when the header's format version is unsupported, or when the
    /// recorded dimensions exceed the terminal's (unless
    /// [`Options::ignore_size_check`] is set). On success the terminal's
    /// control loop is already running on its own thread.
    pub fn new(
        source: S,
        terminal: Arc<dyn Terminal>,
        options: Options,
    ) -> Result<Self, PlayError> {
        let header = source.header();

        if header.version != FORMAT_VERSION {
            return Err(PlayError::UnexpectedVersion(header.version));
        }

        let (width, height) = terminal.dimensions();
        if !options.ignore_size_check && (header.width > width || header.height > height) {
            return Err(PlayError::TerminalTooSmall {
                needed_width: header.width,
                needed_height: header.height,
                width,
                height,
            });
        }

        let wait_cap = options.wait_cap(header.idle_time_limit);

        debug!(
            version = header.version,
            width = header.width,
            height = header.height,
            speed = options.speed,
            ?wait_cap,
            "player ready"
        );

        // Rendezvous channels: a control-side send completes exactly when
        // the scheduling loop observes it.
        let (pause_tx, pause_rx) = bounded(0);
        let (stop_tx, stop_rx) = bounded(0);
        let handle = ControlHandle::new(pause_tx, stop_tx);

        let control_terminal = Arc::clone(&terminal);
        let control: Box<dyn PlaybackControl> = Box::new(handle.clone());
        thread::spawn(move || control_terminal.control_loop(control));

        Ok(Self {
            source,
            terminal,
            speed: options.speed,
            wait_cap,
            handle,
            pause_rx,
            stop_rx,
        })
    }

    /// A genuine control handle for this playback.
    ///
    /// Embedders (and tests) can drive pause/stop without going through a
    /// terminal's control loop; the signals travel the same channels.
    pub fn controller(&self) -> ControlHandle {
        self.handle.clone()
    }

    /// Play the recording to the terminal. Blocks until the source is
    /// exhausted, a stop signal arrives, or an error occurs.
    ///
    /// The terminal is put into raw mode for the duration and restored on
    /// every exit path; a restore failure is reported without masking the
    /// error that ended playback.
    pub fn play(mut self) -> Result<(), PlayError> {
        self.terminal.enter_raw_mode().map_err(PlayError::RawMode)?;

        let mut guard = RestoreOnDrop {
            terminal: Arc::clone(&self.terminal),
            armed: true,
        };

        let result = self.run();

        guard.armed = false;
        let restored = self.terminal.restore();

        match (result, restored) {
            (result, Ok(())) => result,
            (Ok(()), Err(restore)) => Err(PlayError::Restore(restore)),
            (Err(play), Err(restore)) => Err(PlayError::RestoreAfter {
                play: Box::new(play),
                restore,
            }),
        }
    }

    fn run(&mut self) -> Result<(), PlayError> {
        let mut prev_time = 0.0;

        loop {
            let frame = match self.source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    debug!("recording finished");
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            };

            // Input frames are kept in the model but never played back, and
            // they don't shift the delay basis either.
            if frame.kind != FrameType::Output {
                continue;
            }

            let delay = frame_delay(frame.time - prev_time, self.speed, self.wait_cap);
            prev_time = frame.time;

            // A stop raised while the previous frame was being decoded or
            // written wins over the timer and any pending pause.
            if self.stop_rx.try_recv().is_ok() {
                debug!("stopped");
                return Ok(());
            }

            select! {
                recv(after(delay)) -> _ => {}
                recv(self.pause_rx) -> _ => {
                    debug!("paused");
                    select! {
                        recv(self.pause_rx) -> _ => debug!("resumed"),
                        recv(self.stop_rx) -> _ => {
                            debug!("stopped while paused");
                            return Ok(());
                        }
                    }
                }
                recv(self.stop_rx) -> _ => {
                    debug!("stopped");
                    return Ok(());
                }
            }

            self.terminal
                .write_all(frame.data.as_bytes())
                .map_err(PlayError::Write)?;
        }
    }
}

/// Restores the terminal if the scheduling loop unwinds.
///
/// The normal exit path disarms this and restores explicitly so the restore
/// result can be reported.
struct RestoreOnDrop {
    terminal: Arc<dyn Terminal>,
    armed: bool,
}

impl Drop for RestoreOnDrop {
    fn drop(&mut self) {
        if self.armed {
            let _ = self.terminal.restore();
        }
    }
}

/// Real-time wait before a frame: the recorded gap to the previous output
/// frame, scaled by speed and clamped to the cap.
fn frame_delay(gap_secs: f64, speed: f64, cap: Option<Duration>) -> Duration {
    let delay =
        Duration::try_from_secs_f64(gap_secs.max(0.0) / speed).unwrap_or(Duration::MAX);

    match cap {
        Some(cap) if delay > cap => cap,
        _ => delay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_scales_with_speed() {
        assert_eq!(
            frame_delay(1.0, 1.0, None),
            Duration::from_secs(1)
        );
        assert_eq!(
            frame_delay(1.0, 2.0, None),
            Duration::from_millis(500)
        );
        assert_eq!(
            frame_delay(1.0, 0.5, None),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn delay_is_clamped_to_the_cap() {
        let cap = Some(Duration::from_millis(100));
        assert_eq!(frame_delay(10.0, 1.0, cap), Duration::from_millis(100));
        assert_eq!(frame_delay(0.05, 1.0, cap), Duration::from_millis(50));
    }

    #[test]
    fn backwards_timestamps_clamp_to_zero() {
        assert_eq!(frame_delay(-3.0, 1.0, None), Duration::ZERO);
    }

    #[test]
    fn absurd_gaps_saturate_instead_of_panicking() {
        let delay = frame_delay(f64::MAX, 1e-300, None);
        assert_eq!(delay, Duration::MAX);
    }
}
