use arbitrary::Arbitrary;
use serde::Deserialize;
use serde::Serialize;
use strum::Display;
use strum::EnumString;

/// Byte order for integer fields. Big endian unless the tag says otherwise.
#[derive(
    EnumString,
    Display,
    Arbitrary,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Endian {
    #[default]
    Big,
    Little,
}
