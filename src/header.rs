// src/header.rs
use crate::error::{MwfError, Result};
use crate::types::RecordingTime;
use byteorder::{BigEndian, ByteOrder};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// The fixed-length header prefix of a source file, reused verbatim for
/// every derived output file.
///
/// Output headers are byte-for-byte copies of the template except for the
/// seven recording-timestamp bytes at [`HeaderTemplate::TIME_OFFSET`]. The
/// tag/length structure surrounding those offsets is intentionally left
/// untouched, stale declared lengths included; only the timestamp bytes are
/// ever rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTemplate {
    bytes: [u8; Self::LEN],
}

impl HeaderTemplate {
    /// Template length in bytes. The data block of a well-formed file
    /// starts immediately after this prefix.
    pub const LEN: usize = 125;
    /// Offset of the recording timestamp: 112-113 year (big-endian),
    /// 114 month, 115 day, 116 hour, 117 minute, 118 second.
    pub const TIME_OFFSET: usize = 112;

    /// Read the first 125 bytes of `path` as a template.
    ///
    /// This is a separate pass from the TLV decode; the source file is
    /// opened a second time and only the raw prefix is kept.
    pub fn capture(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut bytes = [0u8; Self::LEN];
        let mut filled = 0;
        while filled < Self::LEN {
            let n = file.read(&mut bytes[filled..])?;
            if n == 0 {
                return Err(MwfError::HeaderTooShort { len: filled });
            }
            filled += n;
        }
        Ok(HeaderTemplate { bytes })
    }

    /// Build a template from an in-memory prefix.
    pub fn from_bytes(prefix: &[u8]) -> Result<Self> {
        if prefix.len() < Self::LEN {
            return Err(MwfError::HeaderTooShort { len: prefix.len() });
        }
        let mut bytes = [0u8; Self::LEN];
        bytes.copy_from_slice(&prefix[..Self::LEN]);
        Ok(HeaderTemplate { bytes })
    }

    /// Produce a header for one output file: the template with the
    /// timestamp bytes patched to `time`, everything else verbatim.
    pub fn render(&self, time: RecordingTime) -> [u8; Self::LEN] {
        let mut header = self.bytes;
        let t = Self::TIME_OFFSET;
        BigEndian::write_u16(&mut header[t..t + 2], time.year());
        header[t + 2] = time.month();
        header[t + 3] = time.day();
        header[t + 4] = time.hour();
        header[t + 5] = time.minute();
        header[t + 6] = time.second();
        header
    }

    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.bytes
    }
}
