use crate::byteparse::errors::ParseError;
use crate::byteparse::errors::Result;
use crate::byteparse::len_template::LenTemplate;
use crate::byteparse::record_value::Record;

/// The literal that marks a field whose length must be solved from the next
/// anchored field.
pub const WILDCARD: &str = "*";

/// Declared byte length of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LenSpec {
    /// A fixed byte count.
    Fixed(usize),
    /// Unknown until the next anchored field fixes the extent.
    Wildcard,
    /// Computed from already-parsed fields.
    Expr(LenTemplate),
}

impl LenSpec {
    /// Build from a tag value: `*`, a non-negative integer, or a template.
    /// Returns `None` when the value is none of these.
    pub fn build(value: &str) -> Option<Self> {
        if value == WILDCARD {
            return Some(LenSpec::Wildcard);
        }
        if let Ok(fixed) = value.parse::<i64>() {
            if fixed < 0 {
                return None;
            }
            return Some(LenSpec::Fixed(fixed as usize));
        }
        LenTemplate::parse(value).map(LenSpec::Expr)
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, LenSpec::Wildcard)
    }

    /// Resolve to a concrete byte count. A wildcard has no length of its
    /// own; callers must never ask.
    pub fn resolve(&self, field: &str, record: &Record) -> Result<usize> {
        match self {
            LenSpec::Fixed(len) => Ok(*len),
            LenSpec::Wildcard => Err(ParseError::UnresolvableLength {
                field: field.to_string(),
            }),
            LenSpec::Expr(template) => template.resolve(field, record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::byteparse::record_value::Value;

    #[test]
    fn builds_fixed_wildcard_and_expression() {
        assert_eq!(LenSpec::build("4"), Some(LenSpec::Fixed(4)));
        assert_eq!(LenSpec::build("*"), Some(LenSpec::Wildcard));
        assert!(matches!(LenSpec::build("{{.N}}"), Some(LenSpec::Expr(_))));
        assert_eq!(LenSpec::build("-2"), None);
        assert_eq!(LenSpec::build("{{.N"), None);
    }

    #[test]
    fn resolves_against_record() {
        let mut record = Record::default();
        record.set("N", Value::UInt(9));
        let spec = LenSpec::build("{{.N}}").unwrap();
        assert_eq!(spec.resolve("Body", &record).unwrap(), 9);
        assert_eq!(
            LenSpec::Fixed(2).resolve("Head", &record).unwrap(),
            2
        );
        assert!(LenSpec::Wildcard.resolve("Payload", &record).is_err());
    }
}
