//! `info`, `dump` and `verify`.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use strafe_playback::{FrameView, HeaderView};
use strafe_replay::{CodecConfig, FrameKind, Replay, ReplayReader};

/// Summary printed by `strafe info`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfoReport {
    pub header: HeaderView,
    pub file_size: u64,
    pub frames: u64,
    pub full_frames: u64,
    pub rle_frames: u64,
    pub delta_frames: u64,
    pub overlaps: u64,
    pub total_ms: u64,
}

impl fmt::Display for InfoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = &self.header;
        writeln!(f, "map:       {}", h.map)?;
        writeln!(f, "player:    {} ({})", h.name, h.identity)?;
        writeln!(f, "info:      {}", h.info)?;
        writeln!(f, "recorded:  {}", h.timestamp)?;
        writeln!(f, "version:   {}", h.version)?;
        writeln!(f, "run time:  {} ms", h.time_ms)?;
        writeln!(f, "file size: {} bytes", self.file_size)?;
        writeln!(
            f,
            "frames:    {} ({} full, {} rle, {} delta)",
            self.frames, self.full_frames, self.rle_frames, self.delta_frames
        )?;
        writeln!(f, "overlaps:  {}", self.overlaps)?;
        write!(f, "frame time: {} ms", self.total_ms)
    }
}

/// Result of `strafe verify`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyReport {
    pub frames: usize,
    pub original_len: usize,
    pub reencoded_len: usize,
    /// First byte offset at which the re-encoded stream differs.
    pub first_mismatch: Option<usize>,
    /// The re-encoded stream decodes to the same frames as the file.
    pub frames_match: bool,
}

impl VerifyReport {
    /// The file is byte for byte what this encoder writes.
    pub fn is_canonical(&self) -> bool {
        self.first_mismatch.is_none()
    }

    /// The file survives a decode/encode round trip with its frames intact.
    ///
    /// A non-canonical file can still be sound: a keys byte written only
    /// because an unrecorded button changed is dropped on re-encode.
    pub fn is_sound(&self) -> bool {
        self.frames_match
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Scan `path` record by record and write a summary to `out`.
pub fn info(path: &Path, out: &mut dyn Write) -> Result<InfoReport> {
    let bytes = read_file(path)?;
    let mut reader = ReplayReader::from_bytes(bytes.as_slice())
        .with_context(|| format!("{} is not a replay", path.display()))?;

    let mut report = InfoReport {
        header: HeaderView::from(reader.header()),
        file_size: bytes.len() as u64,
        frames: 0,
        full_frames: 0,
        rle_frames: 0,
        delta_frames: 0,
        overlaps: 0,
        total_ms: 0,
    };
    while let Some(decoded) = reader
        .next_decoded()
        .with_context(|| format!("failed to decode {}", path.display()))?
    {
        match decoded.kind {
            FrameKind::Full => report.full_frames += 1,
            FrameKind::Rle => report.rle_frames += 1,
            FrameKind::Delta => report.delta_frames += 1,
        }
        if decoded.frame.is_overlapping() {
            report.overlaps += 1;
        }
        report.total_ms += u64::from(decoded.frame.timestamp);
        report.frames += 1;
    }
    tracing::debug!(path = %path.display(), frames = report.frames, "scanned replay");

    writeln!(out, "{report}")?;
    Ok(report)
}

/// Write up to `limit` frames of `path` in game units.
///
/// Returns the number of frames written.
pub fn dump(path: &Path, json: bool, limit: Option<usize>, out: &mut dyn Write) -> Result<usize> {
    let bytes = read_file(path)?;
    let replay = Replay::decode(&bytes, &CodecConfig::default())
        .with_context(|| format!("failed to decode {}", path.display()))?;
    let views: Vec<FrameView> = replay
        .frames()
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(FrameView::from)
        .collect();

    if json {
        serde_json::to_writer_pretty(&mut *out, &views).context("failed to write JSON")?;
        writeln!(out)?;
    } else {
        for (i, v) in views.iter().enumerate() {
            writeln!(
                out,
                "{i:>6} {:>3}ms pos=({:.2}, {:.2}, {:.2}) ang=({:.1}, {:.1}) speed={} keys={:#06x} fps={} strafes={} sync={}{}{}",
                v.timestamp,
                v.origin[0],
                v.origin[1],
                v.origin[2],
                v.angles[0],
                v.angles[1],
                v.speed,
                v.keys,
                v.fps,
                v.strafes,
                v.sync,
                if v.grounded { " ground" } else { "" },
                if v.gravity { "" } else { " lowgrav" },
            )?;
        }
    }
    Ok(views.len())
}

/// Decode `path`, encode it again and compare both the bytes and the frames.
pub fn verify(path: &Path, out: &mut dyn Write) -> Result<VerifyReport> {
    let bytes = read_file(path)?;
    let config = CodecConfig::default();
    let replay = Replay::decode(&bytes, &config)
        .with_context(|| format!("failed to decode {}", path.display()))?;
    let reencoded = replay
        .to_bytes(&config)
        .context("failed to re-encode replay")?;

    let first_mismatch = bytes
        .iter()
        .zip(&reencoded)
        .position(|(a, b)| a != b)
        .or_else(|| (bytes.len() != reencoded.len()).then_some(bytes.len().min(reencoded.len())));
    let frames_match = first_mismatch.is_none() || {
        let again = Replay::decode(&reencoded, &config)
            .context("failed to decode re-encoded replay")?;
        again == replay
    };
    let report = VerifyReport {
        frames: replay.len(),
        original_len: bytes.len(),
        reencoded_len: reencoded.len(),
        first_mismatch,
        frames_match,
    };

    match (report.first_mismatch, report.frames_match) {
        (None, _) => writeln!(
            out,
            "{}: ok, {} frames, {} bytes",
            path.display(),
            report.frames,
            report.original_len
        )?,
        (Some(offset), true) => writeln!(
            out,
            "{}: ok, non-canonical encoding from byte {offset} ({} bytes read, {} bytes re-encoded)",
            path.display(),
            report.original_len,
            report.reencoded_len
        )?,
        (Some(offset), false) => writeln!(
            out,
            "{}: MISMATCH, frames differ after re-encode (first byte {offset})",
            path.display()
        )?,
    }
    Ok(report)
}
