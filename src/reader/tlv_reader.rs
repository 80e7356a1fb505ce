// src/reader/tlv_reader.rs
use crate::error::{MwfError, Result};
use crate::samples::decode_samples;
use crate::tags::Tag;
use crate::types::{FieldValue, RecordingTime};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

/// Result of a full TLV decode: typed metadata plus the sample buffer.
///
/// The data record is never present in the metadata map; it is owned
/// directly as `signal`.
#[derive(Debug)]
pub struct DecodedMwf {
    pub metadata: HashMap<String, FieldValue>,
    pub signal: Vec<u16>,
}

/// Sequential TLV decoder for MFER streams
///
/// Reads one (tag, length, payload) record at a time from the start of the
/// stream to its end. There is no random access and no backtracking; the
/// data record consumes the remainder of the stream.
///
/// Any tag outside the known set aborts the decode with
/// [`MwfError::UnknownTag`]. Fields whose values deviate from the format's
/// expected constants are advisory only: a `tracing` warning is emitted and
/// decoding continues with the bytes that were present.
pub struct MwfReader<R: Read> {
    stream: R,
}

impl MwfReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Ok(MwfReader {
            stream: BufReader::with_capacity(65536, file),
        })
    }
}

impl<R: Read> MwfReader<R> {
    pub fn new(stream: R) -> Self {
        MwfReader { stream }
    }

    /// Decode the whole stream. Fails atomically: on any fatal error no
    /// partial metadata is returned.
    pub fn decode(mut self) -> Result<DecodedMwf> {
        let mut metadata = HashMap::new();
        let mut signal: Option<Vec<u16>> = None;

        while let Some(raw_tag) = self.read_tag()? {
            let tag = Tag::from_u8(raw_tag).ok_or(MwfError::UnknownTag(raw_tag))?;
            let length = self.read_byte(tag)? as usize;

            match tag {
                Tag::Endianness => {
                    let payload = self.read_payload(tag, length)?;
                    warn_scalar(tag, &payload, 0);
                }
                Tag::WaveformType => {
                    let payload = self.read_payload(tag, length)?;
                    warn_scalar(tag, &payload, 2);
                }
                Tag::SampleType => {
                    let payload = self.read_payload(tag, length)?;
                    warn_scalar(tag, &payload, 1);
                }
                Tag::BlockLength => {
                    let payload = self.read_payload(tag, length)?;
                    warn_scalar(tag, &payload, 1);
                }
                Tag::ChannelCount => {
                    let payload = self.read_payload(tag, length)?;
                    warn_scalar(tag, &payload, 1);
                }
                Tag::SequenceCount => {
                    let payload = self.read_payload(tag, length)?;
                    warn_scalar(tag, &payload, 0);
                }
                Tag::SampleRate => {
                    let payload = self.read_payload(tag, length)?;
                    let value = decode_sample_rate(&payload)?;
                    metadata.insert(tag.name().to_string(), FieldValue::Float(value));
                }
                Tag::Calibration => {
                    let payload = self.read_payload(tag, length)?;
                    let value = decode_calibration(&payload)?;
                    metadata.insert(tag.name().to_string(), FieldValue::Float(value));
                }
                Tag::ChannelSettings => {
                    // Two-level length encoding: the real payload length is
                    // a second length byte; the first is ignored. Payload is
                    // read and discarded.
                    let inner_length = self.read_byte(tag)? as usize;
                    self.read_payload(tag, inner_length)?;
                }
                Tag::RecordingTime => {
                    let payload = self.read_payload(tag, length)?;
                    let time = RecordingTime::from_payload(&payload)?;
                    metadata.insert(tag.name().to_string(), FieldValue::Time(time));
                }
                Tag::Data => {
                    // The 4-byte declared length is present but unreliable;
                    // the record's true extent is the rest of the stream.
                    self.read_payload(tag, 4)?;
                    let mut rest = Vec::new();
                    self.stream.read_to_end(&mut rest)?;
                    signal = Some(decode_samples(&rest));
                }
                Tag::Preamble
                | Tag::Manufacturer
                | Tag::Comment
                | Tag::Offset
                | Tag::LeadId
                | Tag::PatientId
                | Tag::PatientName
                | Tag::PatientAge
                | Tag::PatientSex => {
                    let payload = self.read_payload(tag, length)?;
                    let text = String::from_utf8_lossy(&payload).into_owned();
                    metadata.insert(tag.name().to_string(), FieldValue::Text(text));
                }
            }
        }

        let signal = signal.ok_or(MwfError::MissingSignal)?;
        Ok(DecodedMwf { metadata, signal })
    }

    /// Read the next tag byte; `None` on a clean end of stream.
    fn read_tag(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        match self.stream.read_exact(&mut byte) {
            Ok(()) => Ok(Some(byte[0])),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn read_byte(&mut self, tag: Tag) -> Result<u8> {
        let mut byte = [0u8; 1];
        self.read_exact(tag, &mut byte)?;
        Ok(byte[0])
    }

    fn read_payload(&mut self, tag: Tag, length: usize) -> Result<Vec<u8>> {
        let mut payload = vec![0u8; length];
        self.read_exact(tag, &mut payload)?;
        Ok(payload)
    }

    fn read_exact(&mut self, tag: Tag, buf: &mut [u8]) -> Result<()> {
        self.stream.read_exact(buf).map_err(|e| {
            if e.kind() == ErrorKind::UnexpectedEof {
                MwfError::TruncatedRecord { tag: tag as u8 }
            } else {
                e.into()
            }
        })
    }
}

/// Warn when a single-byte constant field deviates from its required value.
fn warn_scalar(tag: Tag, payload: &[u8], expected: u8) {
    if payload.len() != 1 || payload[0] != expected {
        tracing::warn!(
            field = tag.name(),
            expected,
            found = ?payload,
            "field value deviates from the format's required constant"
        );
    }
}

/// Sample rate record: unit byte, signed exponent byte, mantissa byte.
/// Decoded value is mantissa * 10^-exponent.
fn decode_sample_rate(payload: &[u8]) -> Result<f64> {
    if payload.len() < 3 {
        return Err(MwfError::TruncatedRecord { tag: Tag::SampleRate as u8 });
    }
    if payload[..3] != [1, 253, 4] {
        tracing::warn!(
            field = Tag::SampleRate.name(),
            found = ?payload,
            "unexpected sample rate encoding"
        );
    }
    let exponent = payload[1] as i8 as i32;
    let mantissa = payload[2] as f64;
    Ok(mantissa * 10f64.powi(-exponent))
}

/// Calibration record: unit byte, signed exponent byte, three reserved
/// bytes, mantissa byte. Decoded value is mantissa * 10^exponent.
fn decode_calibration(payload: &[u8]) -> Result<f64> {
    if payload.len() < 6 {
        return Err(MwfError::TruncatedRecord { tag: Tag::Calibration as u8 });
    }
    if payload[..6] != [0, 250, 0, 0, 0, 4] {
        tracing::warn!(
            field = Tag::Calibration.name(),
            found = ?payload,
            "unexpected calibration encoding"
        );
    }
    let exponent = payload[1] as i8 as i32;
    let mantissa = payload[5] as f64;
    Ok(mantissa * 10f64.powi(exponent))
}
