use crate::byteparse::record_value::Record;

/// Integer form of a failed constant-anchor match.
pub const NOT_MATCH: i64 = -1;
/// Integer form of a buffer too short for the layout.
pub const NEED_MORE_BYTES: i64 = 0;

/// Result of matching a buffer against a record schema.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// Every field resolved. `consumed` is the first index past the last
    /// claimed byte.
    Full { consumed: usize, record: Record },
    /// The buffer ended before a required length was satisfied.
    NeedMoreBytes,
    /// A constant anchor disagreed with the buffer, or no position anchored
    /// a deferred field.
    NotMatch,
}

impl MatchOutcome {
    /// The integer contract: -1, 0, or the positive consumed byte count.
    #[must_use]
    pub fn consumed(&self) -> i64 {
        match self {
            MatchOutcome::Full { consumed, .. } => *consumed as i64,
            MatchOutcome::NeedMoreBytes => NEED_MORE_BYTES,
            MatchOutcome::NotMatch => NOT_MATCH,
        }
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        matches!(self, MatchOutcome::Full { .. })
    }

    #[must_use]
    pub fn record(&self) -> Option<&Record> {
        match self {
            MatchOutcome::Full { record, .. } => Some(record),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_record(self) -> Option<Record> {
        match self {
            MatchOutcome::Full { record, .. } => Some(record),
            _ => None,
        }
    }
}
