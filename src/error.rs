// src/error.rs
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MwfError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("unknown MFER tag {0:#04x}")]
    UnknownTag(u8),

    #[error("stream ends in the middle of a record (tag {tag:#04x})")]
    TruncatedRecord { tag: u8 },

    #[error("file too short for header template: {len} bytes")]
    HeaderTooShort { len: usize },

    #[error("recording time is not a valid calendar date")]
    InvalidTimestamp,

    #[error("no data record found in stream")]
    MissingSignal,

    #[error("no recording time field present")]
    MissingRecordingTime,

    #[error("chunk size must be at least one sample")]
    InvalidChunkSize,
}

pub type Result<T> = std::result::Result<T, MwfError>;
