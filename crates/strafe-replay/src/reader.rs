//! Replay playback reader.
//!
//! [`ReplayReader`] decodes frames one at a time from an in-memory byte
//! buffer. The header is validated on construction. Each decoded frame
//! becomes the predecessor of the next, so frames must be read in order.

use std::io::Read;

use crate::config::{CodecConfig, RleTimestamp};
use crate::error::ReplayError;
use crate::frame::{Decoded, Frame, FrameKind};
use crate::header::Header;
use crate::HEADER_SIZE;

/// Reads replay data from a byte buffer.
///
/// Generic over `B: AsRef<[u8]>` so callers can lend a `&[u8]` or hand
/// over a `Vec<u8>` read from a file.
pub struct ReplayReader<B: AsRef<[u8]> = Vec<u8>> {
    bytes: B,
    header: Header,
    offset: usize,
    prev: Option<Frame>,
    frames_read: u64,
    rle_timestamp: RleTimestamp,
}

impl ReplayReader<Vec<u8>> {
    /// Read a whole replay stream into memory and validate its header.
    pub fn open<R: Read>(reader: R) -> Result<Self, ReplayError> {
        Self::open_with(reader, &CodecConfig::default())
    }

    /// Like [`open`](Self::open) with explicit codec settings.
    pub fn open_with<R: Read>(mut reader: R, config: &CodecConfig) -> Result<Self, ReplayError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes_with(bytes, config)
    }
}

impl<B: AsRef<[u8]>> ReplayReader<B> {
    /// Wrap an in-memory replay and validate its header.
    pub fn from_bytes(bytes: B) -> Result<Self, ReplayError> {
        Self::from_bytes_with(bytes, &CodecConfig::default())
    }

    /// Like [`from_bytes`](Self::from_bytes) with explicit codec settings.
    pub fn from_bytes_with(bytes: B, config: &CodecConfig) -> Result<Self, ReplayError> {
        config.validate()?;
        let header = Header::decode(bytes.as_ref())?;
        Ok(Self {
            bytes,
            header,
            offset: HEADER_SIZE,
            prev: None,
            frames_read: 0,
            rle_timestamp: config.rle_timestamp,
        })
    }

    /// The replay header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Decode the next record, or `None` once the buffer is exhausted.
    ///
    /// Errors carry the index and byte offset of the failing record.
    pub fn next_decoded(&mut self) -> Result<Option<Decoded>, ReplayError> {
        let bytes = self.bytes.as_ref();
        if self.offset >= bytes.len() {
            return Ok(None);
        }
        let decoded = Frame::decode(&bytes[self.offset..], self.prev.as_ref(), self.rle_timestamp)
            .map_err(|e| e.at_frame(self.frames_read as usize, self.offset))?;
        self.offset += decoded.consumed;
        // A run-length record leaves the chain on its predecessor, so an
        // overridden timestamp never leaks into later deltas.
        if decoded.kind != FrameKind::Rle {
            self.prev = Some(decoded.frame);
        }
        self.frames_read += 1;
        Ok(Some(decoded))
    }

    /// Read the next frame, or `None` if the stream is exhausted.
    pub fn next_frame(&mut self) -> Result<Option<Frame>, ReplayError> {
        Ok(self.next_decoded()?.map(|d| d.frame))
    }

    /// Number of frames read so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Byte offset of the next record, counted from the start of the header.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Convert into a frame iterator.
    pub fn frames(self) -> FrameIter<B> {
        FrameIter {
            reader: self,
            done: false,
        }
    }
}

/// Iterator adapter over replay frames.
///
/// Yields `Err` at most once; iteration stops after the first failure.
pub struct FrameIter<B: AsRef<[u8]> = Vec<u8>> {
    reader: ReplayReader<B>,
    done: bool,
}

impl<B: AsRef<[u8]>> FrameIter<B> {
    /// The replay header.
    pub fn header(&self) -> &Header {
        self.reader.header()
    }
}

impl<B: AsRef<[u8]>> Iterator for FrameIter<B> {
    type Item = Result<Frame, ReplayError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.next_frame() {
            Ok(Some(frame)) => Some(Ok(frame)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
