//! Replay recording writer.
//!
//! [`ReplayWriter`] streams frames to any `Write` sink, encoding the
//! binary replay format. The header is written immediately on construction.

use std::io::Write;

use crate::error::ReplayError;
use crate::frame::{Frame, FrameKind};
use crate::header::Header;
use crate::{FLAGS_SIZE, HEADER_SIZE};

/// Writes replay data to a byte stream.
///
/// Generic over `W: Write` so tests can use `Vec<u8>` and production
/// code can use `BufWriter<File>`. The first frame is written in full and
/// every later one as a delta against the frame written before it.
///
/// # Examples
///
/// ```
/// use strafe_replay::{Frame, FrameKind, Header, ReplayReader, ReplayWriter};
///
/// let header = Header { map: "bhop_easy".into(), ..Header::default() };
/// let first = Frame { timestamp: 16, origin: [0, 0, 64], ..Frame::default() };
/// let moved = Frame { origin: [40, 0, 64], ..first };
///
/// let mut buf = Vec::new();
/// let mut writer = ReplayWriter::new(&mut buf, &header).unwrap();
/// assert_eq!(writer.write_frame(&first).unwrap(), FrameKind::Full);
/// assert_eq!(writer.write_frame(&first).unwrap(), FrameKind::Rle);
/// assert_eq!(writer.write_frame(&moved).unwrap(), FrameKind::Delta);
/// assert_eq!(writer.frames_written(), 3);
/// drop(writer);
///
/// let mut reader = ReplayReader::from_bytes(buf.as_slice()).unwrap();
/// assert_eq!(reader.header(), &header);
/// assert_eq!(reader.next_frame().unwrap(), Some(first));
/// assert_eq!(reader.next_frame().unwrap(), Some(first));
/// assert_eq!(reader.next_frame().unwrap(), Some(moved));
/// assert!(reader.next_frame().unwrap().is_none());
/// ```
pub struct ReplayWriter<W: Write> {
    writer: W,
    prev: Option<Frame>,
    frames_written: u64,
    bytes_written: u64,
}

impl<W: Write> ReplayWriter<W> {
    /// Create a new replay writer, immediately writing the header.
    pub fn new(mut writer: W, header: &Header) -> Result<Self, ReplayError> {
        header.encode(&mut writer)?;
        Ok(Self {
            writer,
            prev: None,
            frames_written: 0,
            bytes_written: HEADER_SIZE as u64,
        })
    }

    /// Append one frame and report how it was stored.
    ///
    /// Deltas are taken against the previous frame as passed in here, so
    /// a stream decodes exactly when every run-length frame really is a
    /// copy of its predecessor.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<FrameKind, ReplayError> {
        let (written, kind) = match &self.prev {
            None => (frame.encode(&mut self.writer)?, FrameKind::Full),
            Some(prev) => {
                let written = frame.encode_delta(prev, &mut self.writer)?;
                let kind = if written == FLAGS_SIZE {
                    FrameKind::Rle
                } else {
                    FrameKind::Delta
                };
                (written, kind)
            }
        };
        self.prev = Some(*frame);
        self.frames_written += 1;
        self.bytes_written += written as u64;
        Ok(kind)
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<(), ReplayError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Number of frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Number of bytes written so far, header included.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Consume the writer and return the underlying `Write` sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
