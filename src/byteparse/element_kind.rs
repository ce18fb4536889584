use crate::byteparse::record_schema::RecordSchema;
use serde::Deserialize;
use serde::Serialize;

/// Declared element type of a schema field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    /// Signed integer of unspecified width; reads pick the narrowest width
    /// covering the available bytes.
    Int,
    /// Raw byte payload whose length comes from the attribute table.
    Bytes,
    /// Fixed-size byte array.
    Array(usize),
    /// Nested record matched by its own field list.
    Record(RecordSchema),
}

impl ElementKind {
    /// Byte size implied by the type alone, when it has one.
    #[must_use]
    pub fn implied_size(&self) -> Option<usize> {
        match self {
            ElementKind::U8 | ElementKind::I8 => Some(1),
            ElementKind::U16 | ElementKind::I16 => Some(2),
            ElementKind::U32 | ElementKind::I32 => Some(4),
            ElementKind::U64 | ElementKind::I64 | ElementKind::Int => Some(8),
            ElementKind::Array(len) => Some(*len),
            ElementKind::Bytes | ElementKind::Record(_) => None,
        }
    }

    #[must_use]
    pub fn is_record(&self) -> bool {
        matches!(self, ElementKind::Record(_))
    }
}
