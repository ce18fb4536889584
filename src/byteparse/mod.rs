pub mod element_kind;
pub mod endian;
pub mod errors;
pub mod escape_map;
pub mod field_attr;
pub mod field_attrs;
pub mod field_schema;
pub mod field_spec;
pub mod len_spec;
pub mod len_template;
pub mod match_context;
pub mod match_outcome;
pub mod record_schema;
pub mod record_value;
pub mod scalar_decode;
pub mod schema_file;

pub use element_kind::ElementKind;
pub use endian::Endian;
pub use errors::ParseError;
pub use escape_map::EscapeMap;
pub use escape_map::EscapeRegistry;
pub use field_schema::FieldSchema;
pub use match_outcome::MatchOutcome;
pub use record_schema::RecordSchema;
pub use record_value::Record;
pub use record_value::Value;
pub use schema_file::SchemaFile;

use crate::byteparse::match_context::MatchContext;
use tracing::debug;

/// Match `buf` against `schema`, decoding field values into a fresh record.
///
/// The two recoverable conditions of the matching contract come back as
/// outcomes rather than errors: a buffer too short for the layout is
/// [`MatchOutcome::NeedMoreBytes`], a disagreeing constant anchor (or a
/// deferred field no position anchors) is [`MatchOutcome::NotMatch`].
///
/// # Errors
///
/// Schema problems (malformed tags, unknown escape maps), two adjacent
/// non-anchoring fields, and unresolvable lengths are real errors.
pub fn parse(
    buf: &[u8],
    schema: &RecordSchema,
    escapes: &EscapeRegistry,
) -> errors::Result<MatchOutcome> {
    let mut context = MatchContext::from_schema(buf, schema, escapes)?;
    match context.match_fields() {
        Ok(consumed) => Ok(MatchOutcome::Full {
            consumed,
            record: context.into_record(),
        }),
        Err(error @ ParseError::NeedMoreBytes { .. }) => {
            debug!("{error}");
            Ok(MatchOutcome::NeedMoreBytes)
        }
        Err(error @ (ParseError::NotEqual { .. } | ParseError::NoAnchor { .. })) => {
            debug!("{error}");
            Ok(MatchOutcome::NotMatch)
        }
        Err(error) => Err(error),
    }
}
