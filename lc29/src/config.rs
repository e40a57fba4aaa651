/// How numeric fields of query results are parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldParsing {
    /// Legacy `atoi` semantics: non-numeric tokens read as 0
    #[default]
    Lenient,
    /// Non-numeric tokens fail the exchange
    Strict,
}

/// Driver behaviour knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriverConfig {
    /// Verify the checksum of every received sentence
    pub verify_checksum: bool,
    pub field_parsing: FieldParsing,
    /// Sentences with a foreign identifier tolerated while waiting for a
    /// reply, e.g. periodic `$GNRMC` output. 0 fails on the first one.
    pub max_unsolicited: usize,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            verify_checksum: true,
            field_parsing: FieldParsing::Lenient,
            max_unsolicited: 0,
        }
    }
}

impl DriverConfig {
    pub fn with_verify_checksum(mut self, verify: bool) -> Self {
        self.verify_checksum = verify;
        self
    }

    pub fn with_field_parsing(mut self, parsing: FieldParsing) -> Self {
        self.field_parsing = parsing;
        self
    }

    pub fn with_max_unsolicited(mut self, max: usize) -> Self {
        self.max_unsolicited = max;
        self
    }
}
