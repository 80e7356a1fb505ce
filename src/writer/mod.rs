// src/writer/mod.rs
mod chunk_writer;
mod split_writer;

pub use chunk_writer::MwfWriter;
pub use split_writer::{ChunkIter, ChunkSpec, SplitWriter, DEFAULT_CHUNK_SAMPLES, SAMPLE_RATE_HZ};
