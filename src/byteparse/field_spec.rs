use crate::byteparse::element_kind::ElementKind;
use crate::byteparse::errors::ParseError;
use crate::byteparse::errors::Result;
use crate::byteparse::escape_map::EscapeRegistry;
use crate::byteparse::field_attrs::FieldAttrs;
use crate::byteparse::field_schema::FieldSchema;
use crate::byteparse::len_spec::LenSpec;
use crate::byteparse::match_context::MatchContext;
use crate::byteparse::record_value::Record;
use crate::byteparse::record_value::Value;
use crate::byteparse::scalar_decode::decode_int;
use crate::byteparse::scalar_decode::decode_uint;
use std::borrow::Cow;
use std::fmt;

/// Per-parse state for one declared field: the parsed attribute table and,
/// once matching reaches it, the resolved extent and raw bytes.
///
/// `'s` borrows the schema, `'buf` the buffer under match. Specs are built
/// once per parse invocation and reset before nested re-entry.
pub struct FieldSpec<'s, 'buf> {
    schema: &'s FieldSchema,
    attrs: FieldAttrs,
    pub start: usize,
    pub end: usize,
    pub bytes: &'buf [u8],
    inner: Option<Box<MatchContext<'s, 'buf>>>,
}

impl<'s, 'buf> FieldSpec<'s, 'buf> {
    /// Parse the field's tag and, for record kinds, build the inner context
    /// over an empty buffer (rebased when matching reaches the field).
    pub fn from_schema(schema: &'s FieldSchema, escapes: &EscapeRegistry) -> Result<Self> {
        let attrs = FieldAttrs::parse_tag(&schema.name, &schema.tag, escapes)?;
        let inner = match &schema.kind {
            ElementKind::Record(inner_schema) => Some(Box::new(MatchContext::from_schema(
                &[],
                inner_schema,
                escapes,
            )?)),
            _ => None,
        };
        Ok(Self {
            schema,
            attrs,
            start: 0,
            end: 0,
            bytes: &[],
            inner,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.schema.name
    }

    #[must_use]
    pub fn kind(&self) -> &ElementKind {
        &self.schema.kind
    }

    #[must_use]
    pub fn attrs(&self) -> &FieldAttrs {
        &self.attrs
    }

    /// The record populated by a nested-record field's own matching.
    #[must_use]
    pub fn inner_record(&self) -> Option<&Record> {
        self.inner.as_deref().map(MatchContext::record)
    }

    /// Clear any extent resolved by a previous attempt.
    pub fn reset(&mut self) {
        self.start = 0;
        self.end = 0;
        self.bytes = &[];
        if let Some(inner) = self.inner.as_deref_mut() {
            inner.reset();
        }
    }

    /// False when the field's length must be solved from a later anchor.
    /// A nested record without its own length attribute anchors iff its
    /// last field does.
    #[must_use]
    pub fn can_match(&self) -> bool {
        match &self.attrs.len {
            Some(LenSpec::Wildcard) => false,
            Some(_) => true,
            None => match self.inner.as_deref() {
                Some(inner) => inner.last_can_match(),
                None => true,
            },
        }
    }

    /// For a nested record, the dotted path of a leading field that cannot
    /// anchor itself. Such a record cannot resolve a deferred field in
    /// front of it: the two indeterminate extents would be adjacent.
    #[must_use]
    pub fn inner_leading_non_anchor(&self) -> Option<String> {
        let first = self.inner.as_deref()?.specs().first()?;
        if !first.can_match() {
            return Some(first.name().to_string());
        }
        first
            .inner_leading_non_anchor()
            .map(|deeper| format!("{}.{}", first.name(), deeper))
    }

    /// Resolve the field's byte length against the record parsed so far.
    /// Priority: length attribute, then (for records) the sum of contained
    /// field lengths, then the size implied by the element type.
    pub fn resolved_len(&self, record: &Record) -> Result<usize> {
        if let Some(len) = &self.attrs.len {
            if !len.is_wildcard() {
                return len.resolve(self.name(), record);
            }
        }
        if let Some(inner) = self.inner.as_deref() {
            let mut total = 0;
            for spec in inner.specs() {
                total += spec.resolved_len(inner.record())?;
            }
            return Ok(total);
        }
        self.schema
            .kind
            .implied_size()
            .ok_or_else(|| ParseError::UnresolvableLength {
                field: self.name().to_string(),
            })
    }

    /// Attempt to match this field with its start pinned at `offset`.
    /// Success records the extent and returns the first index past it.
    pub fn match_at(
        &mut self,
        buf: &'buf [u8],
        offset: usize,
        record: &Record,
        prev_can_match: bool,
    ) -> Result<usize> {
        if self.inner.is_some() {
            self.record_match_at(buf, offset, prev_can_match)
        } else {
            self.basic_match_at(buf, offset, record)
        }
    }

    fn basic_match_at(&mut self, buf: &'buf [u8], offset: usize, record: &Record) -> Result<usize> {
        let len = self.resolved_len(record)?;
        let end = offset + len;
        if end > buf.len() {
            return Err(ParseError::NeedMoreBytes {
                field: self.name().to_string(),
                len,
            });
        }
        if let Some(expected) = &self.attrs.equal {
            if &buf[offset..end] != expected.as_slice() {
                return Err(ParseError::NotEqual {
                    field: self.name().to_string(),
                    expected: expected.clone(),
                });
            }
        }
        self.start = offset;
        self.end = end;
        self.bytes = &buf[offset..end];
        Ok(end)
    }

    /// Rebase the inner context onto the remainder of the buffer, run its
    /// match, and translate the relative result back to absolute offsets.
    fn record_match_at(
        &mut self,
        buf: &'buf [u8],
        offset: usize,
        prev_can_match: bool,
    ) -> Result<usize> {
        if offset > buf.len() {
            return Err(ParseError::NeedMoreBytes {
                field: self.name().to_string(),
                len: offset,
            });
        }
        let consumed = {
            let inner = self
                .inner
                .as_deref_mut()
                .expect("record_match_at only runs for record fields");
            inner.rebase(&buf[offset..], prev_can_match);
            inner.match_fields()?
        };
        self.start = offset;
        self.end = offset + consumed;
        self.bytes = &buf[offset..offset + consumed];
        Ok(offset + consumed)
    }

    /// Decode the resolved raw bytes into the field's output value, escape
    /// decoding first when the field declares a mapping. Record fields take
    /// the record their own context populated during the match.
    #[must_use]
    pub fn decode_value(&self) -> Option<Value> {
        let decoded: Cow<'_, [u8]> = match &self.attrs.escape {
            Some(map) => Cow::Owned(map.decode(self.bytes)),
            None => Cow::Borrowed(self.bytes),
        };
        match &self.schema.kind {
            ElementKind::U8 | ElementKind::U16 | ElementKind::U32 | ElementKind::U64 => Some(
                Value::UInt(decode_uint(&self.schema.kind, self.attrs.endian, &decoded)),
            ),
            ElementKind::I8
            | ElementKind::I16
            | ElementKind::I32
            | ElementKind::I64
            | ElementKind::Int => Some(Value::Int(decode_int(
                &self.schema.kind,
                self.attrs.endian,
                &decoded,
            ))),
            ElementKind::Bytes => Some(Value::Bytes(decoded.into_owned())),
            ElementKind::Array(len) => {
                let mut out = vec![0u8; *len];
                let copied = (*len).min(decoded.len());
                out[..copied].copy_from_slice(&decoded[..copied]);
                Some(Value::Bytes(out))
            }
            ElementKind::Record(_) => self
                .inner
                .as_deref()
                .map(|inner| Value::Record(inner.record().clone())),
        }
    }
}

impl fmt::Debug for FieldSpec<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FieldSpec {{ name: {}, extent: [{}..{}], len: {}, bytes: {:02X?} }}",
            self.name(),
            self.start,
            self.end,
            self.end.saturating_sub(self.start),
            self.bytes,
        )
    }
}
