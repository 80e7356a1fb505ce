// src/samples.rs
use byteorder::{BigEndian, ByteOrder};
use bytes::{BufMut, BytesMut};

/// Decode a raw data-block payload into unsigned 16-bit samples.
///
/// On disk each sample is two bytes with the high byte first; the host
/// representation is native `u16`. A trailing odd byte is dropped.
///
/// # Example
///
/// ```
/// use mwf_rs::samples::decode_samples;
///
/// let payload = [0x01, 0x02, 0xFF, 0x00, 0xAA];
/// assert_eq!(decode_samples(&payload), vec![0x0102, 0xFF00]);
/// ```
pub fn decode_samples(payload: &[u8]) -> Vec<u16> {
    payload
        .chunks_exact(2)
        .map(BigEndian::read_u16)
        .collect()
}

/// Accumulates samples in their on-disk byte order before writing.
///
/// The inverse of [`decode_samples`]: each sample is emitted high byte
/// first. Uses `BytesMut` so repeated chunk writes reuse one allocation.
#[derive(Debug, Default)]
pub struct SampleBuffer {
    buffer: BytesMut,
}

impl SampleBuffer {
    pub fn new() -> Self {
        SampleBuffer { buffer: BytesMut::new() }
    }

    pub fn with_capacity(samples: usize) -> Self {
        SampleBuffer {
            buffer: BytesMut::with_capacity(samples * 2),
        }
    }

    /// Append a slice of samples in on-disk byte order.
    pub fn put_samples(&mut self, samples: &[u16]) {
        self.buffer.reserve(samples.len() * 2);
        for &sample in samples {
            self.buffer.put_u16(sample);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn byte_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
