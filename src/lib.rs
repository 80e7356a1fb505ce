// src/lib.rs
//! # mwf-rs
//!
//! A Rust library for reading, writing, and splitting single-channel MFER
//! (`.mwf`) waveform files, the container used by long-duration ECG
//! recorders.
//!
//! ## Features
//!
//! - **Sequential TLV decoding**: typed metadata fields plus the raw
//!   unsigned 16-bit sample buffer, with strict unknown-tag rejection
//! - **Template re-encoding**: output headers are byte-for-byte copies of
//!   the source header with only the recording timestamp patched
//! - **Duration-bounded splitting**: one recording becomes a sequence of
//!   standalone files of fixed sample count, each with a correctly advanced
//!   recording time
//! - **Pure library**: no UI or CLI concepts; callers drive the
//!   decode/encode/split API and observe progress through a callback
//!
//! ## Quick Start
//!
//! ### Splitting a recording
//!
//! ```rust,no_run
//! use mwf_rs::*;
//!
//! fn main() -> Result<()> {
//!     let file = MwfFile::open("input.mwf")?;
//!     println!("{} samples, starts {}", file.sample_count(), file.recording_time()?);
//!
//!     let splitter = SplitWriter::new(&file); // 10-day chunks
//!     let outputs = splitter.write_all_with_progress(|current, total| {
//!         println!("chunk {current}/{total}");
//!     })?;
//!     println!("wrote {} files", outputs.len());
//!     Ok(())
//! }
//! ```
//!
//! ### Re-encoding by hand
//!
//! ```rust,no_run
//! use mwf_rs::*;
//!
//! fn main() -> Result<()> {
//!     let file = MwfFile::open("input.mwf")?;
//!     let time = file.recording_time()?;
//!
//!     let mut writer = MwfWriter::create("copy.mwf")?;
//!     writer.write_file(file.header(), file.signal(), time)?;
//!     Ok(())
//! }
//! ```

// Modules
pub mod error;
pub mod tags;
pub mod types;
pub mod header;
pub mod samples;
pub mod reader;
pub mod file;
pub mod writer;

// Re-export commonly used types at the crate root for convenience
pub use error::{MwfError, Result};

pub use tags::Tag;

pub use types::{FieldValue, RecordingTime};

pub use header::HeaderTemplate;

pub use reader::{DecodedMwf, MwfReader};

pub use file::MwfFile;

pub use writer::{
    ChunkIter,
    ChunkSpec,
    MwfWriter,
    SplitWriter,
    DEFAULT_CHUNK_SAMPLES,
    SAMPLE_RATE_HZ,
};

// Prelude module for glob imports
pub mod prelude {
    //! Convenient imports for common use cases.
    //!
    //! ```rust
    //! use mwf_rs::prelude::*;
    //! ```

    pub use crate::error::{MwfError, Result};
    pub use crate::file::MwfFile;
    pub use crate::types::RecordingTime;
    pub use crate::writer::{MwfWriter, SplitWriter};
}

/// The library version
pub const LIBRARY_VERSION: &str = env!("CARGO_PKG_VERSION");
