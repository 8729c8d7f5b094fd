//! Whole-replay container and file round trips.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::config::{CodecConfig, EmptyReplayPolicy};
use crate::error::ReplayError;
use crate::frame::Frame;
use crate::header::Header;
use crate::reader::ReplayReader;
use crate::writer::ReplayWriter;

/// What an encode produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeSummary {
    /// Frames written.
    pub frames_written: u64,
    /// Bytes written, header included.
    pub bytes_written: u64,
}

/// One header plus an ordered, append-only list of frames.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Replay {
    header: Header,
    frames: Vec<Frame>,
}

impl Replay {
    /// An empty replay with the given header.
    pub fn new(header: Header) -> Self {
        Self {
            header,
            frames: Vec::new(),
        }
    }

    /// A replay built from already captured frames.
    pub fn with_frames(header: Header, frames: Vec<Frame>) -> Self {
        Self { header, frames }
    }

    /// The replay header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Mutable access to the header, e.g. to fill in the run time.
    pub fn header_mut(&mut self) -> &mut Header {
        &mut self.header
    }

    /// Frames in capture order.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Append a frame.
    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// No frames recorded.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Split into header and frames.
    pub fn into_parts(self) -> (Header, Vec<Frame>) {
        (self.header, self.frames)
    }

    /// Frames with both strafe keys held.
    pub fn overlap_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_overlapping()).count()
    }

    /// Sum of frame timestamps in milliseconds.
    pub fn total_time_ms(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.timestamp)).sum()
    }

    // ── Encode ──────────────────────────────────────────────────

    /// Write the header, the first frame in full and the rest as deltas.
    ///
    /// An empty replay is handled per [`CodecConfig::empty_replay`]; under
    /// [`EmptyReplayPolicy::Reject`] nothing is written.
    pub fn encode(
        &self,
        w: &mut dyn Write,
        config: &CodecConfig,
    ) -> Result<EncodeSummary, ReplayError> {
        config.validate()?;
        if self.frames.is_empty() {
            match config.empty_replay {
                EmptyReplayPolicy::Reject => return Err(ReplayError::EmptyReplay),
                EmptyReplayPolicy::HeaderOnly => {
                    tracing::warn!(map = %self.header.map, "encoding replay with no frames");
                }
            }
        }

        let mut writer = ReplayWriter::new(w, &self.header)?;
        for frame in &self.frames {
            writer.write_frame(frame)?;
        }
        writer.flush()?;
        Ok(EncodeSummary {
            frames_written: writer.frames_written(),
            bytes_written: writer.bytes_written(),
        })
    }

    /// Encode into a fresh buffer.
    pub fn to_bytes(&self, config: &CodecConfig) -> Result<Vec<u8>, ReplayError> {
        let mut buf = Vec::new();
        self.encode(&mut buf, config)?;
        Ok(buf)
    }

    // ── Decode ──────────────────────────────────────────────────

    /// Decode a complete replay. Any malformed record fails the whole decode.
    pub fn decode(bytes: &[u8], config: &CodecConfig) -> Result<Self, ReplayError> {
        let reader = ReplayReader::from_bytes_with(bytes, config)?;
        let header = reader.header().clone();
        let frames = reader.frames().collect::<Result<Vec<_>, _>>()?;
        Ok(Self { header, frames })
    }

    /// Read a source to the end and decode it.
    pub fn read_from<R: Read>(mut r: R, config: &CodecConfig) -> Result<Self, ReplayError> {
        let mut bytes = Vec::new();
        r.read_to_end(&mut bytes)?;
        Self::decode(&bytes, config)
    }

    // ── Files ───────────────────────────────────────────────────

    /// Encode to `path`.
    ///
    /// The stream goes to a sibling temporary file that is renamed over
    /// `path` only once fully flushed; a failed save leaves `path` as it was.
    pub fn save(
        &self,
        path: impl AsRef<Path>,
        config: &CodecConfig,
    ) -> Result<EncodeSummary, ReplayError> {
        let path = path.as_ref();
        let tmp = temp_path(path);
        tracing::debug!(path = %path.display(), frames = self.frames.len(), "saving replay");

        let result = self.write_synced(&tmp, config).and_then(|summary| {
            fs::rename(&tmp, path)?;
            Ok(summary)
        });

        match result {
            Ok(summary) => {
                tracing::info!(
                    path = %path.display(),
                    frames = summary.frames_written,
                    bytes = summary.bytes_written,
                    "replay saved"
                );
                Ok(summary)
            }
            Err(e) => {
                let _ = fs::remove_file(&tmp);
                Err(e)
            }
        }
    }

    fn write_synced(&self, path: &Path, config: &CodecConfig) -> Result<EncodeSummary, ReplayError> {
        let file = File::create(path).map_err(|source| ReplayError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let mut out = BufWriter::new(file);
        let summary = self.encode(&mut out, config)?;
        let file = out.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        Ok(summary)
    }

    /// Read and decode the file at `path`.
    pub fn load(path: impl AsRef<Path>, config: &CodecConfig) -> Result<Self, ReplayError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ReplayError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let replay = Self::decode(&bytes, config)?;
        tracing::info!(
            path = %path.display(),
            frames = replay.frames.len(),
            map = %replay.header.map,
            "replay loaded"
        );
        Ok(replay)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
