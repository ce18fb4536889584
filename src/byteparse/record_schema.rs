use crate::byteparse::element_kind::ElementKind;
use crate::byteparse::errors::ParseError;
use crate::byteparse::errors::Result;
use crate::byteparse::escape_map::EscapeRegistry;
use crate::byteparse::field_schema::FieldSchema;
use crate::byteparse::field_spec::FieldSpec;
use itertools::Itertools;
use serde::Deserialize;
use serde::Serialize;

/// Ordered field list describing one record layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecordSchema {
    pub fields: Vec<FieldSchema>,
}

impl RecordSchema {
    #[must_use]
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    /// Static validation without touching a buffer: every tag parses, every
    /// escape name resolves, and no two adjacent fields are both
    /// non-anchoring. Anchoring is judged by the same rule the matcher
    /// applies, by building the field specs and asking them: a nested
    /// record without its own length anchors iff its last field does, and a
    /// nested record whose leading field chain cannot anchor is rejected
    /// after a deferred field. Recurses into nested record kinds.
    ///
    /// # Errors
    ///
    /// Returns the first schema problem found.
    pub fn check(&self, escapes: &EscapeRegistry) -> Result<()> {
        let mut specs = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            specs.push(FieldSpec::from_schema(field, escapes)?);
            if let ElementKind::Record(inner) = &field.kind {
                inner.check(escapes)?;
            }
        }
        for (prev, spec) in specs.iter().tuple_windows() {
            if !prev.can_match() {
                if !spec.can_match() {
                    return Err(ParseError::AmbiguousLayout {
                        first: prev.name().to_string(),
                        second: spec.name().to_string(),
                    });
                }
                if let Some(inner_name) = spec.inner_leading_non_anchor() {
                    return Err(ParseError::AmbiguousLayout {
                        first: prev.name().to_string(),
                        second: format!("{}.{}", spec.name(), inner_name),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_schema_checks_out() {
        let schema = RecordSchema::new(vec![
            FieldSchema::new("Head", ElementKind::Bytes, "len:2,equal:0x55AA"),
            FieldSchema::new("Payload", ElementKind::Bytes, "len:*"),
            FieldSchema::new("Tail", ElementKind::U8, "len:1,equal:0x7E"),
        ]);
        assert!(schema.check(&EscapeRegistry::new()).is_ok());
    }

    #[test]
    fn adjacent_wildcards_are_rejected() {
        let schema = RecordSchema::new(vec![
            FieldSchema::new("A", ElementKind::Bytes, "len:*"),
            FieldSchema::new("B", ElementKind::Bytes, "len:*"),
        ]);
        assert!(matches!(
            schema.check(&EscapeRegistry::new()),
            Err(ParseError::AmbiguousLayout { .. })
        ));
    }

    #[test]
    fn wildcard_before_nested_trailing_wildcard_is_rejected() {
        // The nested record's own length is indeterminate because its last
        // field is a wildcard, so it cannot anchor the deferred field A.
        let nested = RecordSchema::new(vec![
            FieldSchema::new("X", ElementKind::U8, "len:1"),
            FieldSchema::new("Y", ElementKind::Bytes, "len:*"),
        ]);
        let schema = RecordSchema::new(vec![
            FieldSchema::new("A", ElementKind::Bytes, "len:*"),
            FieldSchema::new("Nested", ElementKind::Record(nested), ""),
        ]);
        assert!(matches!(
            schema.check(&EscapeRegistry::new()),
            Err(ParseError::AmbiguousLayout { .. })
        ));
    }

    #[test]
    fn wildcard_before_nested_leading_wildcard_is_rejected() {
        // Mirrors the matcher: even though the nested record anchors via
        // its tail, its leading wildcard would sit flush against A.
        let nested = RecordSchema::new(vec![
            FieldSchema::new("Inner", ElementKind::Bytes, "len:*"),
            FieldSchema::new("Tail", ElementKind::U8, "len:1,equal:0x7E"),
        ]);
        let schema = RecordSchema::new(vec![
            FieldSchema::new("A", ElementKind::Bytes, "len:*"),
            FieldSchema::new("Nested", ElementKind::Record(nested), ""),
        ]);
        assert!(matches!(
            schema.check(&EscapeRegistry::new()),
            Err(ParseError::AmbiguousLayout { .. })
        ));
    }

    #[test]
    fn wildcard_before_anchoring_nested_record_is_accepted() {
        let nested = RecordSchema::new(vec![FieldSchema::new(
            "Len",
            ElementKind::U16,
            "len:2,equal:0x0003",
        )]);
        let schema = RecordSchema::new(vec![
            FieldSchema::new("Head", ElementKind::U8, ""),
            FieldSchema::new("Data", ElementKind::Bytes, "len:*"),
            FieldSchema::new("Nested", ElementKind::Record(nested), ""),
        ]);
        assert!(schema.check(&EscapeRegistry::new()).is_ok());
    }

    #[test]
    fn nested_records_are_checked() {
        let inner = RecordSchema::new(vec![FieldSchema::new(
            "Len",
            ElementKind::U16,
            "equal:55AA",
        )]);
        let schema = RecordSchema::new(vec![FieldSchema::new(
            "Nested",
            ElementKind::Record(inner),
            "",
        )]);
        assert!(matches!(
            schema.check(&EscapeRegistry::new()),
            Err(ParseError::BadHexEqual { .. })
        ));
    }

    #[test]
    fn adjacent_wildcards_inside_nested_record_are_rejected() {
        let inner = RecordSchema::new(vec![
            FieldSchema::new("A", ElementKind::Bytes, "len:*"),
            FieldSchema::new("B", ElementKind::Bytes, "len:*"),
        ]);
        let schema = RecordSchema::new(vec![FieldSchema::new(
            "Nested",
            ElementKind::Record(inner),
            "",
        )]);
        assert!(matches!(
            schema.check(&EscapeRegistry::new()),
            Err(ParseError::AmbiguousLayout { .. })
        ));
    }
}
