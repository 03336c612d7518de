//! The restricted capability a terminal uses to drive playback.
//!
//! Terminals never see the player itself; they get a [`PlaybackControl`]
//! limited to pause and stop. The trait is sealed so nothing outside this
//! module can implement it: a control loop can only ever be driven by a
//! handle the player minted, and those all feed the real state machine.

use crossbeam_channel::Sender;

mod sealed {
    pub trait Sealed {}
}

/// Playback control methods exposed to a terminal's control loop.
pub trait PlaybackControl: sealed::Sealed + Send {
    /// Toggle pause. Pausing while paused resumes. Safe to call repeatedly.
    fn pause(&self);

    /// Interrupt playback. Must be called at most once per playback; a
    /// second call may block until the player is dropped.
    fn stop(&self);
}

/// The only [`PlaybackControl`] implementation.
///
/// Holds the rendezvous senders paired with the player's scheduling loop.
/// Obtained from [`Player::controller`](super::Player::controller) or handed
/// to a terminal's control loop at construction.
#[derive(Clone)]
pub struct ControlHandle {
    pause: Sender<()>,
    stop: Sender<()>,
}

impl ControlHandle {
    pub(super) fn new(pause: Sender<()>, stop: Sender<()>) -> Self {
        Self { pause, stop }
    }
}

impl sealed::Sealed for ControlHandle {}

impl PlaybackControl for ControlHandle {
    fn pause(&self) {
        // A finished player has dropped its receiver; nothing to signal then.
        let _ = self.pause.send(());
    }

    fn stop(&self) {
        let _ = self.stop.send(());
    }
}
