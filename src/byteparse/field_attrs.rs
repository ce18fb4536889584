use crate::byteparse::endian::Endian;
use crate::byteparse::errors::Result;
use crate::byteparse::escape_map::EscapeMap;
use crate::byteparse::escape_map::EscapeRegistry;
use crate::byteparse::field_attr::ATTR_DELIMITER;
use crate::byteparse::field_attr::FieldAttr;
use crate::byteparse::len_spec::LenSpec;
use rustc_hash::FxHashMap;

/// The attribute table for one field, assembled from its tag string.
/// Later occurrences of the same key win, matching tag reading order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldAttrs {
    pub len: Option<LenSpec>,
    pub equal: Option<Vec<u8>>,
    pub endian: Endian,
    pub escape: Option<EscapeMap>,
    /// Unrecognized keys, kept verbatim, inert.
    pub other: FxHashMap<String, String>,
}

impl FieldAttrs {
    /// Parse a `key:value(,key:value)*` tag. An empty tag yields an empty
    /// table (every behavior then comes from the element type).
    pub fn parse_tag(field: &str, tag: &str, escapes: &EscapeRegistry) -> Result<Self> {
        let mut attrs = FieldAttrs::default();
        for chunk in tag.split(ATTR_DELIMITER) {
            let chunk = chunk.trim();
            if chunk.is_empty() {
                continue;
            }
            match FieldAttr::build(field, chunk, escapes)? {
                FieldAttr::Len(len) => attrs.len = Some(len),
                FieldAttr::Equal(equal) => attrs.equal = Some(equal),
                FieldAttr::Endian(endian) => attrs.endian = endian,
                FieldAttr::Escape(map) => attrs.escape = Some(map),
                FieldAttr::Other { key, value } => {
                    attrs.other.insert(key, value);
                }
            }
        }
        Ok(attrs)
    }

    /// True when the field's length is declared as the wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self.len, Some(LenSpec::Wildcard))
    }
}
