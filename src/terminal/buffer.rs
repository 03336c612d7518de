//! In-memory terminal.

use std::io;
use std::sync::Mutex;

use crate::player::PlaybackControl;

use super::Terminal;

/// A terminal that appends everything written to an internal buffer.
///
/// Raw mode is a no-op and the control loop returns immediately; useful in
/// tests and as a capture sink.
pub struct BufferTerminal {
    width: u16,
    height: u16,
    data: Mutex<Vec<u8>>,
}

impl BufferTerminal {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            data: Mutex::new(Vec::new()),
        }
    }

    /// Everything written so far.
    pub fn contents(&self) -> Vec<u8> {
        self.data.lock().unwrap().clone()
    }
}

impl Terminal for BufferTerminal {
    fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn write(&self, data: &[u8]) -> io::Result<usize> {
        self.data.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn enter_raw_mode(&self) -> io::Result<()> {
        Ok(())
    }

    fn restore(&self) -> io::Result<()> {
        Ok(())
    }

    fn control_loop(&self, _control: Box<dyn PlaybackControl>) {}

    fn close(&self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_writes_in_order() {
        let terminal = BufferTerminal::new(80, 24);
        terminal.write_all(b"hello ").unwrap();
        terminal.write_all(b"world").unwrap();
        assert_eq!(terminal.contents(), b"hello world");
    }

    #[test]
    fn reports_dimensions() {
        assert_eq!(BufferTerminal::new(132, 43).dimensions(), (132, 43));
    }
}
