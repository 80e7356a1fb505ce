// tests/integration_tests.rs
use mwf_rs::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Build a complete, structurally valid .mwf byte stream.
///
/// The record layout is arranged so that the recording-time payload lands
/// at offset 112 and the data block at offset 125, matching the fixed
/// offsets of real files.
fn build_mwf_bytes(samples: &[u16], time: RecordingTime) -> Vec<u8> {
    let mut bytes = Vec::new();

    bytes.push(64); // preamble
    bytes.push(32);
    bytes.extend_from_slice(b"MFR~Long-term ECG waveform v1.00");

    bytes.push(23); // manufacturer
    bytes.push(24);
    bytes.extend_from_slice(b"Acme Cardiology Ltd.    ");

    bytes.extend_from_slice(&[1, 1, 0]); // endianness
    bytes.extend_from_slice(&[8, 1, 2]); // waveform type
    bytes.extend_from_slice(&[10, 1, 1]); // sample type
    bytes.extend_from_slice(&[4, 1, 1]); // block length
    bytes.extend_from_slice(&[11, 3, 1, 253, 4]); // sample rate
    bytes.extend_from_slice(&[12, 6, 0, 250, 0, 0, 0, 4]); // calibration
    bytes.extend_from_slice(&[5, 1, 1]); // channel count
    bytes.extend_from_slice(&[6, 1, 0]); // sequence count

    bytes.push(63); // channel-specific settings, two-level length
    bytes.push(0);
    bytes.push(16);
    bytes.extend_from_slice(&[0xC5; 16]);

    bytes.push(133); // recording time
    bytes.push(7);
    assert_eq!(bytes.len(), HeaderTemplate::TIME_OFFSET);
    bytes.extend_from_slice(&time.to_wire_bytes());

    bytes.push(30); // data
    bytes.push(0);
    bytes.extend_from_slice(&[0, 0, 0, 0]); // declared length, unreliable
    assert_eq!(bytes.len(), HeaderTemplate::LEN);
    for s in samples {
        bytes.extend_from_slice(&s.to_be_bytes());
    }

    bytes
}

fn write_fixture(dir: &TempDir, name: &str, samples: &[u16], time: RecordingTime) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, build_mwf_bytes(samples, time)).unwrap();
    path
}

fn t0() -> RecordingTime {
    RecordingTime::new(2023, 5, 1, 0, 0, 0).unwrap()
}

fn read_samples(path: &Path) -> Vec<u16> {
    let bytes = fs::read(path).unwrap();
    assert!(bytes.len() >= HeaderTemplate::LEN);
    samples::decode_samples(&bytes[HeaderTemplate::LEN..])
}

#[test]
fn test_open_and_decode() {
    let dir = TempDir::new().unwrap();
    let samples: Vec<u16> = (0..500).collect();
    let path = write_fixture(&dir, "record.mwf", &samples, t0());

    let file = MwfFile::open(&path).unwrap();

    assert_eq!(file.signal(), &samples[..]);
    assert_eq!(file.sample_count(), 500);
    assert_eq!(file.recording_time().unwrap(), t0());
    assert_eq!(
        file.field("Manufacturer").and_then(FieldValue::as_text),
        Some("Acme Cardiology Ltd.    ")
    );
    assert_eq!(file.field("SampleRate").and_then(FieldValue::as_float), Some(4000.0));
    assert!(file.field("data").is_none());

    // header template is the verbatim file prefix
    let original = fs::read(&path).unwrap();
    assert_eq!(&file.header().as_bytes()[..], &original[..HeaderTemplate::LEN]);
}

#[test]
fn test_full_range_round_trip_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let samples: Vec<u16> = (0..1000).map(|i| (i * 37) as u16).collect();
    let path = write_fixture(&dir, "record.mwf", &samples, t0());
    let original = fs::read(&path).unwrap();

    let file = MwfFile::open(&path).unwrap();
    let mut out = Vec::new();
    MwfWriter::new(&mut out)
        .write_file(file.header(), file.signal(), file.recording_time().unwrap())
        .unwrap();

    assert_eq!(out, original);
}

#[test]
fn test_encode_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "record.mwf", &[1, 2, 3], t0());
    let file = MwfFile::open(&path).unwrap();
    let time = t0().advanced_by_secs(3600);

    let mut first = Vec::new();
    let mut second = Vec::new();
    MwfWriter::new(&mut first).write_file(file.header(), &file.signal()[1..], time).unwrap();
    MwfWriter::new(&mut second).write_file(file.header(), &file.signal()[1..], time).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_unknown_tag_aborts_open() {
    let dir = TempDir::new().unwrap();
    let mut bytes = build_mwf_bytes(&[1, 2, 3], t0());
    bytes[0] = 77; // not in the tag catalog
    let path = dir.path().join("bad.mwf");
    fs::write(&path, bytes).unwrap();

    let result = MwfFile::open(&path);
    assert!(matches!(result, Err(MwfError::UnknownTag(77))));
}

#[test]
fn test_short_file_fails_header_capture() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tiny.mwf");
    // decodes cleanly as TLV but is shorter than the header template
    let mut bytes = vec![1, 1, 0];
    bytes.extend_from_slice(&[133, 7, 0x07, 0xE7, 5, 1, 0, 0, 0]);
    bytes.extend_from_slice(&[30, 0, 0, 0, 0, 0, 0x00, 0x05]);
    fs::write(&path, bytes).unwrap();

    let result = MwfFile::open(&path);
    assert!(matches!(result, Err(MwfError::HeaderTooShort { .. })));
}

#[test]
fn test_split_two_full_chunks_and_empty_tail() {
    let dir = TempDir::new().unwrap();
    let chunk = 1000usize;
    let samples: Vec<u16> = (0..2 * chunk as u32).map(|i| i as u16).collect();
    let path = write_fixture(&dir, "record.mwf", &samples, t0());

    let file = MwfFile::open(&path).unwrap();
    let splitter = SplitWriter::with_chunk_samples(&file, chunk).unwrap();
    assert_eq!(splitter.full_chunk_count(), 2);
    assert_eq!(splitter.output_count(), 3);

    let outputs = splitter.write_all().unwrap();
    assert_eq!(outputs.len(), 3);
    assert_eq!(outputs[0], dir.path().join("record_001.mwf"));
    assert_eq!(outputs[1], dir.path().join("record_002.mwf"));
    assert_eq!(outputs[2], dir.path().join("record_003.mwf"));

    assert_eq!(read_samples(&outputs[0]), &samples[..chunk]);
    assert_eq!(read_samples(&outputs[1]), &samples[chunk..]);
    assert_eq!(read_samples(&outputs[2]), &[] as &[u16]);

    // every output is itself a decodable file with the advanced timestamp
    let step = (chunk / SAMPLE_RATE_HZ as usize) as i64;
    for (i, output) in outputs.iter().enumerate() {
        let part = MwfFile::open(output).unwrap();
        assert_eq!(
            part.recording_time().unwrap(),
            t0().advanced_by_secs(step * i as i64)
        );
        // header bytes outside the timestamp region match the source
        assert_eq!(
            &part.header().as_bytes()[..HeaderTemplate::TIME_OFFSET],
            &file.header().as_bytes()[..HeaderTemplate::TIME_OFFSET]
        );
    }
}

#[test]
fn test_split_concatenation_reproduces_signal() {
    let dir = TempDir::new().unwrap();
    let samples: Vec<u16> = (0..2750u32).map(|i| (i ^ 0x5A5A) as u16).collect();
    let path = write_fixture(&dir, "record.mwf", &samples, t0());

    let file = MwfFile::open(&path).unwrap();
    let outputs = SplitWriter::with_chunk_samples(&file, 600).unwrap().write_all().unwrap();
    assert_eq!(outputs.len(), 2750 / 600 + 1);

    let mut collected = Vec::new();
    for output in &outputs {
        collected.extend(read_samples(output));
    }
    assert_eq!(collected, samples);
}

#[test]
fn test_progress_reports_after_each_chunk() {
    let dir = TempDir::new().unwrap();
    let samples: Vec<u16> = vec![0; 2000];
    let path = write_fixture(&dir, "record.mwf", &samples, t0());

    let file = MwfFile::open(&path).unwrap();
    let mut reports = Vec::new();
    SplitWriter::with_chunk_samples(&file, 1000)
        .unwrap()
        .write_all_with_progress(|current, total| reports.push((current, total)))
        .unwrap();

    assert_eq!(reports, vec![(1, 2), (2, 2), (3, 2)]);
}

#[test]
fn test_split_shorter_than_chunk_gives_single_file() {
    let dir = TempDir::new().unwrap();
    let samples: Vec<u16> = (0..100).collect();
    let path = write_fixture(&dir, "record.mwf", &samples, t0());

    let file = MwfFile::open(&path).unwrap();
    let outputs = SplitWriter::with_chunk_samples(&file, 100_000).unwrap().write_all().unwrap();

    assert_eq!(outputs.len(), 1);
    assert_eq!(read_samples(&outputs[0]), samples);
    let part = MwfFile::open(&outputs[0]).unwrap();
    assert_eq!(part.recording_time().unwrap(), t0());
}

#[test]
fn test_zero_chunk_size_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "record.mwf", &[1], t0());
    let file = MwfFile::open(&path).unwrap();

    let result = SplitWriter::with_chunk_samples(&file, 0);
    assert!(matches!(result, Err(MwfError::InvalidChunkSize)));
}

#[test]
fn test_advisory_deviations_still_decode() {
    tracing_subscriber::fmt()
        .with_env_filter("mwf_rs=warn")
        .try_init()
        .ok();

    let dir = TempDir::new().unwrap();
    let mut bytes = build_mwf_bytes(&[9, 9], t0());
    bytes[62] = 1; // endianness byte, required to be 0
    bytes[65] = 7; // waveform type byte, required to be 2
    let path = dir.path().join("odd.mwf");
    fs::write(&path, bytes).unwrap();

    // deviations are warnings on the tracing channel, never errors
    let file = MwfFile::open(&path).unwrap();
    assert_eq!(file.signal(), &[9, 9]);
    assert_eq!(file.recording_time().unwrap(), t0());
}

#[test]
fn test_split_without_recording_time_fails() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("untimed.mwf");
    // valid TLV, long enough for the template, but no recording-time record
    let mut bytes = Vec::new();
    bytes.push(22);
    bytes.push(120);
    bytes.extend_from_slice(&[b'x'; 120]);
    bytes.extend_from_slice(&[30, 0, 0, 0, 0, 0]);
    bytes.extend_from_slice(&[0x01, 0x02, 0x03, 0x04]);
    fs::write(&path, bytes).unwrap();

    let file = MwfFile::open(&path).unwrap();
    let result = SplitWriter::with_chunk_samples(&file, 10).unwrap().write_all();
    assert!(matches!(result, Err(MwfError::MissingRecordingTime)));
}
