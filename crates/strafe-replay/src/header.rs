//! The fixed 133-byte metadata block that opens every replay file.
//!
//! ```text
//! offset  size  field
//!      0     8  timestamp (Unix seconds)
//!      8     2  version
//!     10    32  map
//!     42     3  time (elapsed run time, ms)
//!     45    32  name
//!     77    24  identity
//!    101    32  info
//! ```
//!
//! Text fields are zero-padded on write and truncated if too long.

use std::io::Write;

use crate::codec::{
    read_fixed_str, read_u16_be, read_u24_be, read_u64_be, write_fixed_str, write_u16_be,
    write_u24_be, write_u64_be, U24_MAX,
};
use crate::error::ReplayError;
use crate::{FORMAT_VERSION, HEADER_SIZE};

/// Width of the map name field.
pub const MAP_WIDTH: usize = 32;
/// Width of the player name field.
pub const NAME_WIDTH: usize = 32;
/// Width of the player identity field.
pub const IDENTITY_WIDTH: usize = 24;
/// Width of the free-form info field.
pub const INFO_WIDTH: usize = 32;

/// Replay metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    /// Recording time, Unix seconds.
    pub timestamp: u64,
    /// Format version.
    pub version: u16,
    /// Map the run was recorded on.
    pub map: String,
    /// Elapsed run time in milliseconds. Only the low 24 bits are stored.
    pub time: u32,
    /// Player display name.
    pub name: String,
    /// Player account identity.
    pub identity: String,
    /// Free-form annotation (course, style, ...).
    pub info: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            timestamp: 0,
            version: FORMAT_VERSION,
            map: String::new(),
            time: 0,
            name: String::new(),
            identity: String::new(),
            info: String::new(),
        }
    }
}

impl Header {
    /// Write the header. Always emits exactly [`HEADER_SIZE`] bytes.
    pub fn encode(&self, w: &mut dyn Write) -> Result<(), ReplayError> {
        if self.time > U24_MAX {
            tracing::debug!(time = self.time, "run time exceeds 24 bits, high bits dropped");
        }
        write_u64_be(w, self.timestamp)?;
        write_u16_be(w, self.version)?;
        write_fixed_str(w, &self.map, MAP_WIDTH)?;
        write_u24_be(w, self.time)?;
        write_fixed_str(w, &self.name, NAME_WIDTH)?;
        write_fixed_str(w, &self.identity, IDENTITY_WIDTH)?;
        write_fixed_str(w, &self.info, INFO_WIDTH)?;
        Ok(())
    }

    /// Decode a header from the first [`HEADER_SIZE`] bytes of `bytes`.
    ///
    /// Trailing bytes are ignored. Fewer than [`HEADER_SIZE`] bytes fails
    /// with [`ReplayError::TruncatedHeader`].
    pub fn decode(bytes: &[u8]) -> Result<Self, ReplayError> {
        if bytes.len() < HEADER_SIZE {
            return Err(ReplayError::TruncatedHeader { found: bytes.len() });
        }
        let mut r = &bytes[..HEADER_SIZE];
        Ok(Self {
            timestamp: read_u64_be(&mut r, "header timestamp")?,
            version: read_u16_be(&mut r, "header version")?,
            map: read_fixed_str(&mut r, MAP_WIDTH, "header map")?,
            time: read_u24_be(&mut r, "header time")?,
            name: read_fixed_str(&mut r, NAME_WIDTH, "header name")?,
            identity: read_fixed_str(&mut r, IDENTITY_WIDTH, "header identity")?,
            info: read_fixed_str(&mut r, INFO_WIDTH, "header info")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dust2() -> Header {
        Header {
            timestamp: 1_700_000_000,
            version: 100,
            map: "de_dust2".into(),
            time: 5000,
            name: "Player".into(),
            identity: "STEAM_0:1:12345".into(),
            info: "surf".into(),
        }
    }

    #[test]
    fn roundtrip_is_exactly_header_size() {
        let header = dust2();
        let mut buf = Vec::new();
        header.encode(&mut buf).unwrap();
        assert_eq!(buf.len(), HEADER_SIZE);
        assert_eq!(Header::decode(&buf).unwrap(), header);
    }

    #[test]
    fn field_offsets() {
        let mut buf = Vec::new();
        dust2().encode(&mut buf).unwrap();
        assert_eq!(&buf[0..8], &1_700_000_000u64.to_be_bytes());
        assert_eq!(&buf[8..10], &[0x00, 0x64]);
        assert_eq!(&buf[10..18], b"de_dust2");
        assert!(buf[18..42].iter().all(|&b| b == 0));
        assert_eq!(&buf[42..45], &[0x00, 0x13, 0x88]);
        assert_eq!(&buf[45..51], b"Player");
        assert_eq!(&buf[77..92], b"STEAM_0:1:12345");
        assert_eq!(&buf[101..105], b"surf");
    }

    #[test]
    fn short_buffer_is_truncated_header() {
        let mut buf = Vec::new();
        dust2().encode(&mut buf).unwrap();
        for len in [0, 1, 10, HEADER_SIZE - 1] {
            assert!(matches!(
                Header::decode(&buf[..len]),
                Err(ReplayError::TruncatedHeader { found }) if found == len
            ));
        }
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut buf = Vec::new();
        dust2().encode(&mut buf).unwrap();
        buf.extend_from_slice(&[0xAA; 20]);
        assert_eq!(Header::decode(&buf).unwrap(), dust2());
    }

    #[test]
    fn oversized_fields_truncate() {
        let header = Header {
            map: "m".repeat(40),
            identity: "i".repeat(30),
            time: 0x0100_0005,
            ..dust2()
        };
        let mut buf = Vec::new();
        header.encode(&mut buf).unwrap();
        assert_eq!(buf.len(), HEADER_SIZE);

        let got = Header::decode(&buf).unwrap();
        assert_eq!(got.map, "m".repeat(MAP_WIDTH));
        assert_eq!(got.identity, "i".repeat(IDENTITY_WIDTH));
        assert_eq!(got.time, 5);
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut buf = Vec::new();
        dust2().encode(&mut buf).unwrap();
        buf[45] = 0xFF;
        let got = Header::decode(&buf).unwrap();
        assert!(got.name.starts_with('\u{FFFD}'));
        assert!(got.name.ends_with("layer"));
    }
}
