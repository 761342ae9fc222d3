use std::fmt;

/// Raw zero-based position of a line in the fixture file, comments included.
pub type LineIndex = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeyedField {
    Callsign,
    VesselName,
}

impl KeyedField {
    /// Fixture key and decoded struct member share the same spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Callsign => "callsign",
            Self::VesselName => "vessel_name",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "callsign" => Some(Self::Callsign),
            "vessel_name" => Some(Self::VesselName),
            _ => None,
        }
    }
}

impl fmt::Display for KeyedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional expectation attached to a fixture line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extra {
    Keyed { field: KeyedField, value: String },
    BinaryLength,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRecord {
    pub index: LineIndex,
    pub message_type: i64,
    pub payload: String,
    pub mmsi: i64,
    pub extras: Vec<Extra>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Blank,
    Comment,
    TooFewTokens(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedLine {
    pub index: LineIndex,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default)]
pub struct FixtureSet {
    pub records: Vec<TestRecord>,
    pub skipped: Vec<SkippedLine>,
    pub line_count: usize,
}

/// Which numeric column of a fixture line failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    MessageType,
    Mmsi,
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MessageType => f.write_str("message type"),
            Self::Mmsi => f.write_str("mmsi"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedTestCase {
    pub index: LineIndex,
    pub name: String,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSuite {
    pub preamble: String,
    pub cases: Vec<GeneratedTestCase>,
    pub entry_point: String,
}

impl GeneratedSuite {
    pub fn to_source(&self) -> String {
        let mut out = String::with_capacity(
            self.preamble.len()
                + self.entry_point.len()
                + self.cases.iter().map(|c| c.source.len() + 1).sum::<usize>(),
        );
        out.push_str(&self.preamble);
        for case in &self.cases {
            out.push_str(&case.source);
            out.push('\n');
        }
        out.push_str(&self.entry_point);
        out
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenerationSummary {
    pub line_count: usize, // Raw lines read, comments included
    pub generated: usize,  // Test functions emitted
    pub skipped: Vec<SkippedLine>,
    pub bytes_written: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    UpToDate,
    Stale,
    Missing,
}
