// src/types.rs
use crate::error::{MwfError, Result};
use byteorder::{BigEndian, ByteOrder};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use std::fmt;

/// Recording start time of a waveform file
///
/// Decoded from the recording-time record, where the year is stored as a
/// byte-swapped (big-endian) 16-bit value followed by month, day, hour,
/// minute and second as single bytes. Sub-second precision present on disk
/// is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RecordingTime(NaiveDateTime);

impl RecordingTime {
    /// Minimum payload length of a recording-time record.
    pub const WIRE_LEN: usize = 7;

    pub fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Result<Self> {
        NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
            .and_then(|d| d.and_hms_opt(hour as u32, minute as u32, second as u32))
            .map(RecordingTime)
            .ok_or(MwfError::InvalidTimestamp)
    }

    /// Decode from a recording-time payload (at least 7 bytes).
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        if payload.len() < Self::WIRE_LEN {
            return Err(MwfError::TruncatedRecord { tag: crate::tags::Tag::RecordingTime as u8 });
        }
        let year = BigEndian::read_u16(&payload[0..2]);
        Self::new(year, payload[2], payload[3], payload[4], payload[5], payload[6])
    }

    /// Encode back to the 7-byte wire form (year big-endian, then
    /// month/day/hour/minute/second).
    pub fn to_wire_bytes(&self) -> [u8; 7] {
        let mut bytes = [0u8; 7];
        BigEndian::write_u16(&mut bytes[0..2], self.year());
        bytes[2] = self.month();
        bytes[3] = self.day();
        bytes[4] = self.hour();
        bytes[5] = self.minute();
        bytes[6] = self.second();
        bytes
    }

    /// The time `seconds` whole seconds after this one.
    pub fn advanced_by_secs(&self, seconds: i64) -> Self {
        RecordingTime(self.0 + Duration::seconds(seconds))
    }

    pub fn year(&self) -> u16 {
        self.0.year() as u16
    }

    pub fn month(&self) -> u8 {
        self.0.month() as u8
    }

    pub fn day(&self) -> u8 {
        self.0.day() as u8
    }

    pub fn hour(&self) -> u8 {
        self.0.hour() as u8
    }

    pub fn minute(&self) -> u8 {
        self.0.minute() as u8
    }

    pub fn second(&self) -> u8 {
        self.0.second() as u8
    }
}

impl fmt::Display for RecordingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// A decoded metadata field value, typed per tag
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// ASCII text payload (preamble, manufacturer, patient fields, ...)
    Text(String),
    /// Exponent/mantissa encoded quantity (sample rate, calibration)
    Float(f64),
    /// Recording start time
    Time(RecordingTime),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<RecordingTime> {
        match self {
            FieldValue::Time(t) => Some(*t),
            _ => None,
        }
    }
}
