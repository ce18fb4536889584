use crate::byteparse::errors::ParseError;
use crate::byteparse::errors::Result;
use crate::byteparse::record_value::Record;

/// A length expression rendered against the partially-parsed record.
///
/// The template is literal text interleaved with `{{.FieldName}}` references
/// to fields that have already been assigned. Rendering substitutes each
/// reference with the field's integer value, then the whole rendered text is
/// trimmed and parsed as an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LenTemplate {
    raw: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    FieldRef(String),
}

impl LenTemplate {
    /// Parse the template text. Returns `None` when a `{{` is never closed
    /// or a reference is not of the `.identifier` form.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut segments = Vec::new();
        let mut rest = raw;
        while let Some(open) = rest.find("{{") {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after_open = &rest[open + 2..];
            let close = after_open.find("}}")?;
            let inner = after_open[..close].trim();
            let name = inner.strip_prefix('.')?;
            if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return None;
            }
            segments.push(Segment::FieldRef(name.to_string()));
            rest = &after_open[close + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }
        Some(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Render against the record parsed so far and parse the result as a
    /// non-negative length. A reference to an unassigned field, non-numeric
    /// rendered text, or a negative value cannot resolve.
    pub fn resolve(&self, field: &str, record: &Record) -> Result<usize> {
        let unresolvable = || ParseError::UnresolvableLength {
            field: field.to_string(),
        };
        let mut rendered = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::FieldRef(name) => {
                    let value = record.int(name).ok_or_else(unresolvable)?;
                    rendered.push_str(&value.to_string());
                }
            }
        }
        let value: i64 = rendered.trim().parse().map_err(|_| unresolvable())?;
        if value < 0 {
            return Err(unresolvable());
        }
        Ok(value as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byteparse::record_value::Value;

    fn record_with(name: &str, value: i64) -> Record {
        let mut record = Record::default();
        record.set(name, Value::Int(value));
        record
    }

    #[test]
    fn plain_reference() {
        let template = LenTemplate::parse("{{.N}}").unwrap();
        let record = record_with("N", 3);
        assert_eq!(template.resolve("Body", &record).unwrap(), 3);
    }

    #[test]
    fn literal_text_around_reference() {
        let template = LenTemplate::parse("  {{ .N }} ").unwrap();
        let record = record_with("N", 12);
        assert_eq!(template.resolve("Body", &record).unwrap(), 12);
    }

    #[test]
    fn unassigned_field_cannot_resolve() {
        let template = LenTemplate::parse("{{.Missing}}").unwrap();
        let record = Record::default();
        assert!(matches!(
            template.resolve("Body", &record),
            Err(ParseError::UnresolvableLength { .. })
        ));
    }

    #[test]
    fn non_numeric_render_cannot_resolve() {
        let template = LenTemplate::parse("about {{.N}}").unwrap();
        let record = record_with("N", 3);
        assert!(template.resolve("Body", &record).is_err());
    }

    #[test]
    fn negative_render_cannot_resolve() {
        let template = LenTemplate::parse("{{.N}}").unwrap();
        let record = record_with("N", -4);
        assert!(template.resolve("Body", &record).is_err());
    }

    #[test]
    fn unclosed_reference_is_rejected() {
        assert!(LenTemplate::parse("{{.N").is_none());
        assert!(LenTemplate::parse("{{N}}").is_none());
        assert!(LenTemplate::parse("{{.}}").is_none());
    }

    #[test]
    fn text_without_references_still_parses() {
        // Resolution decides whether the rendered text is numeric.
        let template = LenTemplate::parse("7").unwrap();
        assert_eq!(template.resolve("Body", &Record::default()).unwrap(), 7);
        let template = LenTemplate::parse("seven").unwrap();
        assert!(template.resolve("Body", &Record::default()).is_err());
    }
}
