// src/file.rs
use crate::error::{MwfError, Result};
use crate::header::HeaderTemplate;
use crate::reader::MwfReader;
use crate::tags::Tag;
use crate::types::{FieldValue, RecordingTime};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// A fully decoded waveform file
///
/// Built once per source file by [`MwfFile::open`]: the TLV stream is
/// decoded into typed metadata and the sample buffer, and the raw 125-byte
/// header prefix is captured on a second pass over the same file. The value
/// is read-only afterwards; splitting derives new files without touching it.
#[derive(Debug)]
pub struct MwfFile {
    path: PathBuf,
    metadata: HashMap<String, FieldValue>,
    signal: Vec<u16>,
    header: HeaderTemplate,
}

impl MwfFile {
    /// Decode `path` in full. Fails atomically; no partial result is
    /// retained on error.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let decoded = MwfReader::open(&path)?.decode()?;
        let header = HeaderTemplate::capture(&path)?;

        Ok(MwfFile {
            path,
            metadata: decoded.metadata,
            signal: decoded.signal,
            header,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> &HashMap<String, FieldValue> {
        &self.metadata
    }

    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.metadata.get(name)
    }

    /// The decoded sample buffer. This is the data record's payload; it is
    /// owned here and never appears in the metadata map.
    pub fn signal(&self) -> &[u16] {
        &self.signal
    }

    pub fn sample_count(&self) -> usize {
        self.signal.len()
    }

    pub fn header(&self) -> &HeaderTemplate {
        &self.header
    }

    /// Recording start time, required for splitting.
    pub fn recording_time(&self) -> Result<RecordingTime> {
        self.metadata
            .get(Tag::RecordingTime.name())
            .and_then(FieldValue::as_time)
            .ok_or(MwfError::MissingRecordingTime)
    }
}
