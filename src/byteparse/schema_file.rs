use crate::byteparse::errors::Result;
use crate::byteparse::escape_map::EscapeMap;
use crate::byteparse::escape_map::EscapeRegistry;
use crate::byteparse::record_schema::RecordSchema;
use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;

/// On-disk schema bundle: the record layout plus the named escape maps its
/// tags may reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaFile {
    pub record: RecordSchema,
    #[serde(default)]
    pub escapes: FxHashMap<String, EscapeMap>,
}

impl SchemaFile {
    /// Load a schema bundle from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not valid JSON
    /// for this shape.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    #[must_use]
    pub fn into_parts(self) -> (RecordSchema, EscapeRegistry) {
        (self.record, EscapeRegistry::from(self.escapes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byteparse::element_kind::ElementKind;
    use crate::byteparse::field_schema::FieldSchema;

    #[test]
    fn deserializes_record_and_escapes() {
        let text = r#"{
            "record": {
                "fields": [
                    { "name": "Head", "kind": "u8", "tag": "len:1,equal:0x7E" },
                    { "name": "Payload", "kind": "bytes", "tag": "len:*,escape:Escapes" },
                    { "name": "Tail", "kind": "u8", "tag": "len:1,equal:0x7E" }
                ]
            },
            "escapes": {
                "Escapes": [[125, [125, 1]], [126, [125, 2]]]
            }
        }"#;
        let file: SchemaFile = serde_json::from_str(text).unwrap();
        assert_eq!(file.record.fields.len(), 3);
        assert_eq!(
            file.record.fields[0],
            FieldSchema::new("Head", ElementKind::U8, "len:1,equal:0x7E")
        );
        let (record, escapes) = file.into_parts();
        assert!(record.check(&escapes).is_ok());
        let map = escapes.get("Escapes").unwrap();
        assert_eq!(map.decode(&[0x7D, 0x02]), vec![0x7E]);
    }

    #[test]
    fn escapes_default_to_empty() {
        let file: SchemaFile = serde_json::from_str(r#"{ "record": { "fields": [] } }"#).unwrap();
        assert!(file.escapes.is_empty());
    }
}
