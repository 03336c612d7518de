//! The operating-system terminal.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use crossterm::tty::IsTty;

use crate::player::PlaybackControl;

use super::{Terminal, TerminalError};

/// How often the control loop wakes up to check for close.
const CONTROL_TICK: Duration = Duration::from_millis(100);

/// The terminal the process is attached to.
///
/// Playback keys: space toggles pause, `q` or ctrl-c stops.
pub struct OsTerminal {
    width: u16,
    height: u16,
    closed: AtomicBool,
}

impl OsTerminal {
    /// Build from the process's stdin/stdout.
    ///
    /// Fails with [`TerminalError::NotATty`] when stdin is not attached to a
    /// terminal (piped input cannot deliver playback keystrokes).
    pub fn new() -> Result<Self, TerminalError> {
        if !io::stdin().is_tty() {
            return Err(TerminalError::NotATty);
        }

        let (width, height) = terminal::size().map_err(TerminalError::Size)?;

        Ok(Self {
            width,
            height,
            closed: AtomicBool::new(false),
        })
    }
}

impl Terminal for OsTerminal {
    fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn write(&self, data: &[u8]) -> io::Result<usize> {
        let mut stdout = io::stdout().lock();
        let written = stdout.write(data)?;
        stdout.flush()?;
        Ok(written)
    }

    fn enter_raw_mode(&self) -> io::Result<()> {
        terminal::enable_raw_mode()
    }

    fn restore(&self) -> io::Result<()> {
        // RIS first: the recording may have left colors, alternate screens
        // or other modes behind.
        let mut stdout = io::stdout().lock();
        stdout.write_all(b"\x1bc")?;
        stdout.flush()?;

        terminal::disable_raw_mode()
    }

    fn control_loop(&self, control: Box<dyn PlaybackControl>) {
        loop {
            if self.closed.load(Ordering::Relaxed) {
                return;
            }

            match event::poll(CONTROL_TICK) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(_) => return,
            }

            let key = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
                Ok(_) => continue,
                Err(_) => return,
            };

            match key.code {
                KeyCode::Char(' ') => control.pause(),
                KeyCode::Char('q') => {
                    control.stop();
                    return;
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    control.stop();
                    return;
                }
                _ => {}
            }
        }
    }

    fn close(&self) -> io::Result<()> {
        self.closed.store(true, Ordering::Relaxed);
        Ok(())
    }
}
