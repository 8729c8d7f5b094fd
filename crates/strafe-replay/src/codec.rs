//! Big-endian scalar encode/decode shared by the header and frame codecs.
//!
//! Every multi-byte integer on the wire is big-endian. Widths are fixed
//! per field (1, 2, 3 or 8 bytes); there is no length prefixing, so a
//! short read always means the record was truncated.

use std::io::{self, Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};

use crate::error::ReplayError;

/// Largest value representable in a 24-bit field.
pub const U24_MAX: u32 = 0x00FF_FFFF;

// ── Primitive writers ───────────────────────────────────────────

/// Write a single byte.
pub fn write_u8(w: &mut dyn Write, v: u8) -> Result<(), ReplayError> {
    w.write_u8(v)?;
    Ok(())
}

/// Write a single signed byte (two's complement).
pub fn write_i8(w: &mut dyn Write, v: i8) -> Result<(), ReplayError> {
    w.write_i8(v)?;
    Ok(())
}

/// Write a big-endian u16.
pub fn write_u16_be(w: &mut dyn Write, v: u16) -> Result<(), ReplayError> {
    w.write_u16::<BigEndian>(v)?;
    Ok(())
}

/// Write a big-endian i16.
pub fn write_i16_be(w: &mut dyn Write, v: i16) -> Result<(), ReplayError> {
    w.write_i16::<BigEndian>(v)?;
    Ok(())
}

/// Write the low 24 bits of `v` big-endian. Higher bits are dropped.
pub fn write_u24_be(w: &mut dyn Write, v: u32) -> Result<(), ReplayError> {
    w.write_u24::<BigEndian>(v & U24_MAX)?;
    Ok(())
}

/// Write a big-endian u64.
pub fn write_u64_be(w: &mut dyn Write, v: u64) -> Result<(), ReplayError> {
    w.write_u64::<BigEndian>(v)?;
    Ok(())
}

/// Write `s` into a zero-padded field of exactly `width` bytes.
///
/// Text longer than `width` is cut at the byte level.
pub fn write_fixed_str(w: &mut dyn Write, s: &str, width: usize) -> Result<(), ReplayError> {
    let bytes = s.as_bytes();
    let len = bytes.len().min(width);
    w.write_all(&bytes[..len])?;
    w.write_all(&vec![0u8; width - len])?;
    Ok(())
}

// ── Primitive readers ───────────────────────────────────────────

fn short_read(what: &str) -> impl FnOnce(io::Error) -> ReplayError + '_ {
    move |e| match e.kind() {
        io::ErrorKind::UnexpectedEof => ReplayError::malformed(format!("truncated {what}")),
        _ => ReplayError::Io(e),
    }
}

/// Read a single byte. `what` names the field for error reporting.
pub fn read_u8(r: &mut dyn Read, what: &str) -> Result<u8, ReplayError> {
    r.read_u8().map_err(short_read(what))
}

/// Read a single signed byte.
pub fn read_i8(r: &mut dyn Read, what: &str) -> Result<i8, ReplayError> {
    r.read_i8().map_err(short_read(what))
}

/// Read a big-endian u16.
pub fn read_u16_be(r: &mut dyn Read, what: &str) -> Result<u16, ReplayError> {
    r.read_u16::<BigEndian>().map_err(short_read(what))
}

/// Read a big-endian i16.
pub fn read_i16_be(r: &mut dyn Read, what: &str) -> Result<i16, ReplayError> {
    r.read_i16::<BigEndian>().map_err(short_read(what))
}

/// Read a big-endian 24-bit unsigned integer.
pub fn read_u24_be(r: &mut dyn Read, what: &str) -> Result<u32, ReplayError> {
    r.read_u24::<BigEndian>().map_err(short_read(what))
}

/// Read a big-endian u64.
pub fn read_u64_be(r: &mut dyn Read, what: &str) -> Result<u64, ReplayError> {
    r.read_u64::<BigEndian>().map_err(short_read(what))
}

/// Read a zero-padded text field of exactly `width` bytes.
///
/// The value is everything before the first zero byte. Bytes that are
/// not valid UTF-8 are replaced rather than rejected.
pub fn read_fixed_str(r: &mut dyn Read, width: usize, what: &str) -> Result<String, ReplayError> {
    let mut buf = vec![0u8; width];
    r.read_exact(&mut buf).map_err(short_read(what))?;
    let end = buf.iter().position(|&b| b == 0).unwrap_or(width);
    Ok(String::from_utf8_lossy(&buf[..end]).into_owned())
}
