// src/reader/mod.rs
mod tlv_reader;

pub use tlv_reader::{DecodedMwf, MwfReader};
