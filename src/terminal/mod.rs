//! Terminal capability.
//!
//! The scheduler is decoupled from any concrete terminal through the
//! [`Terminal`] trait: report dimensions, accept raw bytes, flip raw display
//! mode on and off, and run a blocking control loop that translates whatever
//! the medium considers "pause" and "stop" gestures into calls on the sealed
//! [`PlaybackControl`](crate::player::PlaybackControl) capability.
//!
//! Implementations here: the real OS terminal ([`OsTerminal`]) and an
//! in-memory sink ([`BufferTerminal`]) for tests and capture pipelines.
//! Remote terminals (say, a socket speaking structured messages) implement
//! the same trait outside this crate.

mod buffer;
mod os;

use std::io;

use thiserror::Error;

use crate::player::PlaybackControl;

pub use buffer::BufferTerminal;
pub use os::OsTerminal;

/// An abstract terminal-like sink.
///
/// Implementations are shared between the scheduling loop (writes) and the
/// control loop thread (input), so all methods take `&self`.
pub trait Terminal: Send + Sync {
    /// Terminal window size as (width, height).
    fn dimensions(&self) -> (u16, u16);

    /// Write raw bytes, returning how many were accepted.
    fn write(&self, data: &[u8]) -> io::Result<usize>;

    /// Write the whole buffer.
    fn write_all(&self, mut data: &[u8]) -> io::Result<()> {
        while !data.is_empty() {
            match self.write(data)? {
                0 => return Err(io::Error::from(io::ErrorKind::WriteZero)),
                n => data = &data[n..],
            }
        }
        Ok(())
    }

    /// Put the terminal into raw display mode. The previous state must be
    /// recoverable by [`restore`](Self::restore).
    fn enter_raw_mode(&self) -> io::Result<()>;

    /// Undo [`enter_raw_mode`](Self::enter_raw_mode).
    fn restore(&self) -> io::Result<()>;

    /// Run the control event loop, reporting user intent through `control`.
    /// Blocks until [`close`](Self::close) is called or the underlying
    /// medium ends.
    fn control_loop(&self, control: Box<dyn PlaybackControl>);

    /// Ask the control loop to exit. Does not tear down the medium itself.
    fn close(&self) -> io::Result<()>;
}

/// Failure to set up a real terminal.
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("stdin is not a terminal")]
    NotATty,

    #[error("query terminal size failed: {0}")]
    Size(#[source] io::Error),
}
