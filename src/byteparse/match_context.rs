use crate::byteparse::errors::ParseError;
use crate::byteparse::errors::Result;
use crate::byteparse::escape_map::EscapeRegistry;
use crate::byteparse::field_spec::FieldSpec;
use crate::byteparse::record_schema::RecordSchema;
use crate::byteparse::record_value::Record;
use std::mem;
use tracing::debug;
use tracing::trace;

/// Workspace for one match attempt: the buffer, the field specs in
/// declaration order, and the record being populated.
///
/// Walking the specs applies one rule per field pair: a field whose length
/// is determinable matches directly at the running offset; a wildcard field
/// is deferred, and the next field that can match on its own is scanned for
/// through the remaining buffer, its found position fixing the deferred
/// extent. Two adjacent non-anchoring fields cannot be told apart.
pub struct MatchContext<'s, 'buf> {
    buf: &'buf [u8],
    specs: Vec<FieldSpec<'s, 'buf>>,
    record: Record,
    /// Whether the field just before this context's first field (in the
    /// enclosing record, if any) had a determinable extent. True at the
    /// root.
    prev_can_match: bool,
}

impl<'s, 'buf> MatchContext<'s, 'buf> {
    /// Build the per-parse field specs from the schema.
    pub fn from_schema(
        buf: &'buf [u8],
        schema: &'s RecordSchema,
        escapes: &EscapeRegistry,
    ) -> Result<Self> {
        let specs = schema
            .fields
            .iter()
            .map(|field| FieldSpec::from_schema(field, escapes))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            buf,
            specs,
            record: Record::default(),
            prev_can_match: true,
        })
    }

    #[must_use]
    pub fn buf(&self) -> &'buf [u8] {
        self.buf
    }

    #[must_use]
    pub fn specs(&self) -> &[FieldSpec<'s, 'buf>] {
        &self.specs
    }

    #[must_use]
    pub fn record(&self) -> &Record {
        &self.record
    }

    #[must_use]
    pub fn into_record(mut self) -> Record {
        mem::take(&mut self.record)
    }

    /// Point this context at a fresh buffer view, clearing all prior state.
    pub(crate) fn rebase(&mut self, buf: &'buf [u8], prev_can_match: bool) {
        self.buf = buf;
        self.prev_can_match = prev_can_match;
        self.reset();
    }

    /// Clear extents and decoded values from a previous attempt.
    pub fn reset(&mut self) {
        self.record = Record::default();
        for spec in &mut self.specs {
            spec.reset();
        }
    }

    /// Whether this context's trailing field self-anchors; an empty field
    /// list trivially does.
    pub(crate) fn last_can_match(&self) -> bool {
        self.specs.last().is_none_or(FieldSpec::can_match)
    }

    /// Walk the fields in declaration order, resolving deferred extents
    /// from the next anchored field. Returns the first index past the last
    /// consumed byte.
    ///
    /// # Errors
    ///
    /// `NeedMoreBytes` when the buffer ends before a required length,
    /// `NotEqual` when a constant anchor disagrees outside a scan,
    /// `NoAnchor` when a scan exhausts the buffer, `AmbiguousLayout` for
    /// two adjacent non-anchoring fields, and `UnresolvableLength` when no
    /// length rule applies.
    pub fn match_fields(&mut self) -> Result<usize> {
        let buf = self.buf;
        let mut offset = 0usize;
        let mut prev_can_match = self.prev_can_match;
        for index in 0..self.specs.len() {
            if index > 0 {
                prev_can_match = self.specs[index - 1].can_match();
                if !prev_can_match && !self.specs[index].can_match() {
                    return Err(ParseError::AmbiguousLayout {
                        first: self.specs[index - 1].name().to_string(),
                        second: self.specs[index].name().to_string(),
                    });
                }
            }
            if !self.specs[index].can_match() {
                // Deferred: pin the start, let the next anchor fix the end.
                self.specs[index].start = offset;
                trace!(
                    "deferring {} at offset {} until the next anchor",
                    self.specs[index].name(),
                    offset
                );
                continue;
            }
            if prev_can_match || index == 0 {
                let new_offset =
                    self.specs[index].match_at(buf, offset, &self.record, prev_can_match)?;
                offset = new_offset;
                self.assign(index);
                continue;
            }
            // The previous field is deferred: scan forward for the first
            // position where this field matches on its own.
            if let Some(inner_name) = self.specs[index].inner_leading_non_anchor() {
                return Err(ParseError::AmbiguousLayout {
                    first: self.specs[index - 1].name().to_string(),
                    second: format!("{}.{}", self.specs[index].name(), inner_name),
                });
            }
            let mut matched = false;
            for pos in offset..buf.len() {
                match self.specs[index].match_at(buf, pos, &self.record, prev_can_match) {
                    Ok(new_offset) => {
                        {
                            let prev = &mut self.specs[index - 1];
                            prev.end = pos;
                            prev.bytes = &buf[prev.start..pos];
                        }
                        debug!(
                            "anchored {} at {}, resolving {} to [{}..{}]",
                            self.specs[index].name(),
                            pos,
                            self.specs[index - 1].name(),
                            self.specs[index - 1].start,
                            pos
                        );
                        self.assign(index - 1);
                        self.assign(index);
                        offset = new_offset;
                        matched = true;
                        break;
                    }
                    Err(error) if error.is_scan_recoverable() => {
                        trace!(
                            "{} does not anchor at {}: {}",
                            self.specs[index].name(),
                            pos,
                            error
                        );
                    }
                    Err(error) => return Err(error),
                }
            }
            if !matched {
                return Err(ParseError::NoAnchor {
                    field: self.specs[index].name().to_string(),
                });
            }
        }
        Ok(offset)
    }

    /// Decode a spec's resolved bytes into the output record.
    fn assign(&mut self, index: usize) {
        if let Some(value) = self.specs[index].decode_value() {
            let name = self.specs[index].name().to_string();
            self.record.set(&name, value);
        }
    }
}
