// src/writer/chunk_writer.rs
use crate::error::Result;
use crate::header::HeaderTemplate;
use crate::samples::SampleBuffer;
use crate::types::RecordingTime;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes one structurally valid waveform file
///
/// The output is the rendered header template (timestamp bytes patched,
/// everything else verbatim) followed by the samples in on-disk byte order.
/// No tag or length framing is written for the data block; it is implicitly
/// everything after the 125-byte header.
///
/// Two writes from the same template, chunk and timestamp produce identical
/// bytes; the only failure mode is I/O on the destination.
pub struct MwfWriter<W: Write> {
    dest: W,
}

impl MwfWriter<BufWriter<File>> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::create(path)?;
        Ok(MwfWriter {
            dest: BufWriter::new(file),
        })
    }
}

impl<W: Write> MwfWriter<W> {
    pub fn new(dest: W) -> Self {
        MwfWriter { dest }
    }

    pub fn write_file(
        &mut self,
        template: &HeaderTemplate,
        samples: &[u16],
        time: RecordingTime,
    ) -> Result<()> {
        self.dest.write_all(&template.render(time))?;

        let mut buffer = SampleBuffer::with_capacity(samples.len());
        buffer.put_samples(samples);
        self.dest.write_all(buffer.as_bytes())?;

        self.dest.flush()?;
        Ok(())
    }
}
