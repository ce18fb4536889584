use crate::byteparse::element_kind::ElementKind;
use serde::Deserialize;
use serde::Serialize;

/// One declared field of a record layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    pub kind: ElementKind,
    /// Attribute tag: `key:value` pairs separated by commas, e.g.
    /// `len:2,equal:0x55AA,endian:little`.
    #[serde(default)]
    pub tag: String,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, kind: ElementKind, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            tag: tag.into(),
        }
    }
}
