//! Streaming frame decoding.
//!
//! A frame source hands out one frame at a time from an underlying byte
//! stream; the whole recording is never held in memory, so arbitrarily large
//! casts play back with a constant footprint.

use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use super::{Frame, FrameParseError, Header};

/// A lazy, forward-only sequence of frames plus the recording header.
pub trait FrameSource {
    /// The decoded recording header, available from construction on.
    fn header(&self) -> &Header;

    /// Decode the next frame.
    ///
    /// Returns `Ok(Some(frame))` while frames remain, `Ok(None)` on clean end
    /// of stream, and `Err` when a record is malformed or the underlying read
    /// fails. The returned borrow is only valid until the next call; callers
    /// that keep frame data across calls must clone it.
    fn next_frame(&mut self) -> Result<Option<&Frame>, SourceError>;
}

/// Frame source error.
///
/// End of stream is not an error; it is reported as `Ok(None)` from
/// [`FrameSource::next_frame`].
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("read failed: {0}")]
    Io(#[from] io::Error),

    #[error("missing header")]
    MissingHeader,

    #[error("malformed header: {0}")]
    MalformedHeader(#[source] serde_json::Error),

    /// A malformed frame record. `index` is the 0-based record position in
    /// the stream; the header occupies index 0, so frames start at 1.
    #[error("frame {index}: {source}")]
    Frame {
        index: usize,
        #[source]
        source: FrameParseError,
    },
}

/// Reads frames from any buffered reader, one record per call.
///
/// Construction decodes the header line and fails fast when it is missing or
/// malformed. The line buffer and current-frame slot are reused across calls.
pub struct StreamFrameSource<R> {
    reader: R,
    header: Header,
    line: String,
    frame: Frame,
    index: usize,
}

impl StreamFrameSource<BufReader<fs::File>> {
    /// Open a recording file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SourceError> {
        let file = fs::File::open(path)?;
        Self::new(BufReader::new(file))
    }
}

impl<R: BufRead> StreamFrameSource<R> {
    /// Wrap a reader positioned at the start of a recording.
    pub fn new(mut reader: R) -> Result<Self, SourceError> {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(SourceError::MissingHeader);
        }

        let header: Header =
            serde_json::from_str(line.trim_end()).map_err(SourceError::MalformedHeader)?;

        Ok(Self {
            reader,
            header,
            line,
            frame: Frame {
                time: 0.0,
                kind: super::FrameType::Output,
                data: String::new(),
            },
            index: 0,
        })
    }
}

impl<R: BufRead> FrameSource for StreamFrameSource<R> {
    fn header(&self) -> &Header {
        &self.header
    }

    fn next_frame(&mut self) -> Result<Option<&Frame>, SourceError> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }

            let record = self.line.trim_end_matches(&['\r', '\n'][..]);
            if record.is_empty() {
                continue;
            }

            self.index += 1;
            self.frame = Frame::parse(record).map_err(|source| SourceError::Frame {
                index: self.index,
                source,
            })?;
            return Ok(Some(&self.frame));
        }
    }
}
