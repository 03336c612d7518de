//! castplay — play asciicast v2 terminal recordings.
//!
//! The crate streams a recording frame by frame ([`asciicast`]), paces the
//! output frames against real time with interactive pause/resume and stop
//! ([`player`]), and writes them to a pluggable terminal back-end
//! ([`terminal`]).
//!
//! # Quick start
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
//!
//! let player = Player::new(source, terminal, Options::default())?;
//! player.play()?;
//! # Ok(())
//! # }
//! ```

pub mod asciicast;
pub mod player;
pub mod terminal;

pub use asciicast::{
    EnvInfo, Frame, FrameParseError, FrameSource, FrameType, Header, SourceError,
    StreamFrameSource, FORMAT_VERSION,
};
pub use player::{ControlHandle, Options, PlayError, PlaybackControl, Player};
pub use terminal::{BufferTerminal, OsTerminal, Terminal, TerminalError};
