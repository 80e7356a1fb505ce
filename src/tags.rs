// src/tags.rs

/// MFER tag enumeration
///
/// The closed set of tags this library understands. A tag outside this set
/// aborts the decode; see [`crate::reader::MwfReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    Endianness = 1,
    BlockLength = 4,
    ChannelCount = 5,
    SequenceCount = 6,
    WaveformType = 8,
    LeadId = 9,
    SampleType = 10,
    SampleRate = 11,
    Calibration = 12,
    Offset = 13,
    Comment = 22,
    Manufacturer = 23,
    Data = 30,
    ChannelSettings = 63,
    Preamble = 64,
    PatientName = 129,
    PatientId = 130,
    PatientAge = 131,
    PatientSex = 132,
    RecordingTime = 133,
}

impl Tag {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Tag::Endianness),
            4 => Some(Tag::BlockLength),
            5 => Some(Tag::ChannelCount),
            6 => Some(Tag::SequenceCount),
            8 => Some(Tag::WaveformType),
            9 => Some(Tag::LeadId),
            10 => Some(Tag::SampleType),
            11 => Some(Tag::SampleRate),
            12 => Some(Tag::Calibration),
            13 => Some(Tag::Offset),
            22 => Some(Tag::Comment),
            23 => Some(Tag::Manufacturer),
            30 => Some(Tag::Data),
            63 => Some(Tag::ChannelSettings),
            64 => Some(Tag::Preamble),
            129 => Some(Tag::PatientName),
            130 => Some(Tag::PatientId),
            131 => Some(Tag::PatientAge),
            132 => Some(Tag::PatientSex),
            133 => Some(Tag::RecordingTime),
            _ => None,
        }
    }

    /// Field name under which this tag's value appears in the metadata map.
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Endianness => "Endianity",
            Tag::BlockLength => "SPR",
            Tag::ChannelCount => "NS",
            Tag::SequenceCount => "Rec",
            Tag::WaveformType => "Waveform",
            Tag::LeadId => "LeadId",
            Tag::SampleType => "gdftyp",
            Tag::SampleRate => "SampleRate",
            Tag::Calibration => "Cal",
            Tag::Offset => "Off",
            Tag::Comment => "Comment",
            Tag::Manufacturer => "Manufacturer",
            Tag::Data => "data",
            Tag::ChannelSettings => "channel-specific settings",
            Tag::Preamble => "Preamble",
            Tag::PatientName => "Patient Name",
            Tag::PatientId => "Patient Id",
            Tag::PatientAge => "Patient Age",
            Tag::PatientSex => "Patient Sex",
            Tag::RecordingTime => "Recording time",
        }
    }

    /// Check if this tag carries free-form ASCII text
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Tag::Preamble
                | Tag::Manufacturer
                | Tag::Comment
                | Tag::Offset
                | Tag::LeadId
                | Tag::PatientName
                | Tag::PatientId
                | Tag::PatientAge
                | Tag::PatientSex
        )
    }
}
