// src/writer/split_writer.rs
use crate::error::{MwfError, Result};
use crate::file::MwfFile;
use crate::types::RecordingTime;
use crate::writer::chunk_writer::MwfWriter;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Sample rate the format's chunking arithmetic is fixed at.
pub const SAMPLE_RATE_HZ: u32 = 250;

/// Default chunk size: 10 days of samples at 250 Hz.
pub const DEFAULT_CHUNK_SAMPLES: usize = 10 * 24 * 60 * 60 * SAMPLE_RATE_HZ as usize;

/// One write request produced by the split plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSpec {
    /// 1-based output index, used for the filename suffix.
    pub index: u32,
    /// Sample range of the source signal covered by this output.
    pub range: Range<usize>,
    /// Recording time patched into this output's header.
    pub start_time: RecordingTime,
}

impl ChunkSpec {
    pub fn sample_count(&self) -> usize {
        self.range.end - self.range.start
    }
}

/// Iterator over the split plan.
///
/// Emits one full chunk per `chunk_samples` window, then exactly one tail
/// request for the remainder, even when the remainder is empty. A signal of
/// length N therefore always yields `N / chunk_samples + 1` requests, and
/// concatenating the ranges in order reproduces `0..N` with no gaps or
/// overlaps.
#[derive(Debug)]
pub struct ChunkIter {
    total: usize,
    chunk_samples: usize,
    step_secs: i64,
    start: usize,
    index: u32,
    time: RecordingTime,
    tail_emitted: bool,
}

impl ChunkIter {
    pub(crate) fn new(total: usize, chunk_samples: usize, start_time: RecordingTime) -> Self {
        ChunkIter {
            total,
            chunk_samples,
            // whole seconds; a remainder of samples shorter than 1/250 s is
            // not carried forward
            step_secs: (chunk_samples / SAMPLE_RATE_HZ as usize) as i64,
            start: 0,
            index: 1,
            time: start_time,
            tail_emitted: false,
        }
    }
}

impl Iterator for ChunkIter {
    type Item = ChunkSpec;

    fn next(&mut self) -> Option<ChunkSpec> {
        if self.tail_emitted {
            return None;
        }

        let end = if self.total - self.start >= self.chunk_samples {
            self.start + self.chunk_samples
        } else {
            self.tail_emitted = true;
            self.total
        };

        let spec = ChunkSpec {
            index: self.index,
            range: self.start..end,
            start_time: self.time,
        };

        self.start = end;
        self.index += 1;
        self.time = self.time.advanced_by_secs(self.step_secs);

        Some(spec)
    }
}

/// Splits a decoded file into time-ordered standalone files
///
/// Each output is a valid file of the same format: the source's header
/// template with the recording time advanced by the preceding chunks'
/// duration, followed by that chunk's samples. Outputs are written beside
/// the source as `{stem}_001.mwf`, `{stem}_002.mwf`, ...
///
/// Writing is strictly sequential; one file is fully written before the
/// next starts, and a failed write aborts the remaining chunks.
pub struct SplitWriter<'a> {
    file: &'a MwfFile,
    chunk_samples: usize,
}

impl<'a> SplitWriter<'a> {
    /// Split with the default 10-day chunk size.
    pub fn new(file: &'a MwfFile) -> Self {
        SplitWriter {
            file,
            chunk_samples: DEFAULT_CHUNK_SAMPLES,
        }
    }

    /// Split with an explicit chunk size in samples.
    pub fn with_chunk_samples(file: &'a MwfFile, chunk_samples: usize) -> Result<Self> {
        if chunk_samples == 0 {
            return Err(MwfError::InvalidChunkSize);
        }
        Ok(SplitWriter { file, chunk_samples })
    }

    /// Number of full-size chunks in the plan (the tail is not counted).
    pub fn full_chunk_count(&self) -> usize {
        self.file.sample_count() / self.chunk_samples
    }

    /// Number of files the split will produce, tail included.
    pub fn output_count(&self) -> usize {
        self.full_chunk_count() + 1
    }

    /// The ordered split plan.
    pub fn chunks(&self) -> Result<ChunkIter> {
        let start_time = self.file.recording_time()?;
        Ok(ChunkIter::new(self.file.sample_count(), self.chunk_samples, start_time))
    }

    /// Write every chunk, returning the output paths in order.
    pub fn write_all(&self) -> Result<Vec<PathBuf>> {
        self.write_all_with_progress(|_, _| {})
    }

    /// Write every chunk, invoking `progress(current_index, full_chunk_count)`
    /// after each file is written.
    pub fn write_all_with_progress(
        &self,
        mut progress: impl FnMut(u32, usize),
    ) -> Result<Vec<PathBuf>> {
        let template = self.file.header();
        let signal = self.file.signal();
        let total = self.full_chunk_count();
        let mut written = Vec::new();

        for chunk in self.chunks()? {
            let path = chunk_path(self.file.path(), chunk.index);
            let mut writer = MwfWriter::create(&path)?;
            writer.write_file(template, &signal[chunk.range.clone()], chunk.start_time)?;
            written.push(path);
            progress(chunk.index, total);
        }

        Ok(written)
    }
}

/// Output path for one chunk: the source name with its extension replaced
/// by a zero-padded index suffix (`record.mwf` -> `record_001.mwf`).
fn chunk_path(source: &Path, index: u32) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("split");
    source.with_file_name(format!("{stem}_{index:03}.mwf"))
}
