use thiserror::Error;

/// Errors raised while building field specs from a schema or while matching
/// a buffer against them.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("field {field}: malformed {key} attribute value {value:?}")]
    MalformedAttribute {
        field: String,
        key: String,
        value: String,
    },
    #[error("field {field}: equal value {value:?} must be 0x-prefixed hex with an even digit count")]
    BadHexEqual { field: String, value: String },
    #[error("field {field}: no escape map named {name:?} is registered")]
    UnknownEscapeMap { field: String, name: String },
    #[error("{field} could not ensure field length")]
    UnresolvableLength { field: String },
    #[error("{field} needs more bytes ({len} required)")]
    NeedMoreBytes { field: String, len: usize },
    #[error("{field} not equal to {expected:02X?}")]
    NotEqual { field: String, expected: Vec<u8> },
    #[error("no position in the remaining buffer anchors {field}")]
    NoAnchor { field: String },
    #[error("could not parse fields {first} and {second}")]
    AmbiguousLayout { first: String, second: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ParseError {
    /// True for the failures an anchor scan steps past: the trial position
    /// simply did not anchor, so the scan moves on.
    pub fn is_scan_recoverable(&self) -> bool {
        matches!(
            self,
            ParseError::NeedMoreBytes { .. } | ParseError::NotEqual { .. }
        )
    }
}

pub type Result<T> = core::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_recoverable_kinds() {
        let need = ParseError::NeedMoreBytes {
            field: "Head".to_string(),
            len: 2,
        };
        let not_equal = ParseError::NotEqual {
            field: "Head".to_string(),
            expected: vec![0x55, 0xAA],
        };
        let ambiguous = ParseError::AmbiguousLayout {
            first: "A".to_string(),
            second: "B".to_string(),
        };
        assert!(need.is_scan_recoverable());
        assert!(not_equal.is_scan_recoverable());
        assert!(!ambiguous.is_scan_recoverable());
    }

    #[test]
    fn messages_name_the_field() {
        let e = ParseError::UnresolvableLength {
            field: "Payload".to_string(),
        };
        assert_eq!(e.to_string(), "Payload could not ensure field length");
    }
}
