use crate::byteparse::endian::Endian;
use crate::byteparse::errors::ParseError;
use crate::byteparse::errors::Result;
use crate::byteparse::escape_map::EscapeMap;
use crate::byteparse::escape_map::EscapeRegistry;
use crate::byteparse::len_spec::LenSpec;
use std::str::FromStr;

/// Separates attributes within a field tag.
pub const ATTR_DELIMITER: char = ',';
/// Separates an attribute key from its value.
pub const KEY_VALUE_DELIMITER: char = ':';

pub const LEN: &str = "len";
pub const EQUAL: &str = "equal";
pub const ENDIAN: &str = "endian";
pub const ESCAPE: &str = "escape";

/// One parsed attribute from a field tag. Unrecognized keys are preserved
/// verbatim and have no effect on matching.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldAttr {
    Len(LenSpec),
    Equal(Vec<u8>),
    Endian(Endian),
    Escape(EscapeMap),
    Other { key: String, value: String },
}

impl FieldAttr {
    /// Build one attribute from a `key:value` chunk of a tag. `field` is
    /// the owning field's name, used for error attribution. The `escape`
    /// value names a map in `escapes`; resolution happens here so a missing
    /// name fails at spec construction, not mid-match.
    pub fn build(field: &str, chunk: &str, escapes: &EscapeRegistry) -> Result<Self> {
        let (key, value) = match chunk.split_once(KEY_VALUE_DELIMITER) {
            Some((key, value)) => (key.trim(), value.trim()),
            None => (chunk.trim(), ""),
        };
        match key {
            LEN => {
                LenSpec::build(value)
                    .map(FieldAttr::Len)
                    .ok_or_else(|| ParseError::MalformedAttribute {
                        field: field.to_string(),
                        key: LEN.to_string(),
                        value: value.to_string(),
                    })
            }
            EQUAL => {
                let digits =
                    value
                        .strip_prefix("0x")
                        .ok_or_else(|| ParseError::BadHexEqual {
                            field: field.to_string(),
                            value: value.to_string(),
                        })?;
                hex_bytes(digits)
                    .map(FieldAttr::Equal)
                    .ok_or_else(|| ParseError::BadHexEqual {
                        field: field.to_string(),
                        value: value.to_string(),
                    })
            }
            ENDIAN => Endian::from_str(value).map(FieldAttr::Endian).map_err(|_| {
                ParseError::MalformedAttribute {
                    field: field.to_string(),
                    key: ENDIAN.to_string(),
                    value: value.to_string(),
                }
            }),
            ESCAPE => escapes
                .get(value)
                .cloned()
                .map(FieldAttr::Escape)
                .ok_or_else(|| ParseError::UnknownEscapeMap {
                    field: field.to_string(),
                    name: value.to_string(),
                }),
            _ => Ok(FieldAttr::Other {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Decode an even-length run of hex digits pairwise. No prefix expected.
pub fn hex_bytes(digits: &str) -> Option<Vec<u8>> {
    if digits.is_empty() || !digits.len().is_multiple_of(2) {
        return None;
    }
    let mut out = Vec::with_capacity(digits.len() / 2);
    for pair in digits.as_bytes().chunks(2) {
        let pair = std::str::from_utf8(pair).ok()?;
        out.push(u8::from_str_radix(pair, 16).ok()?);
    }
    Some(out)
}
