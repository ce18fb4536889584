use crate::byteparse::MatchOutcome;
use crate::byteparse::SchemaFile;
use crate::byteparse::field_attr::hex_bytes;
use crate::byteparse::parse;
use arbitrary::Arbitrary;
use bytes::Bytes;
use clap::Args;
use eyre::bail;
use std::path::PathBuf;
use tracing::debug;

#[derive(Args, Arbitrary, PartialEq, Debug, Default)]
pub struct DecodeArgs {
    /// Path to the schema JSON file (first positional)
    pub schema: PathBuf,
    /// Path to a file holding the raw input bytes
    #[clap(long, conflicts_with = "hex")]
    pub input: Option<PathBuf>,
    /// Input bytes as a hex string (e.g. "55AA0102", optionally 0x-prefixed)
    #[clap(long)]
    pub hex: Option<String>,
}

impl DecodeArgs {
    pub fn invoke(self) -> eyre::Result<()> {
        let (record_schema, escapes) = SchemaFile::load(&self.schema)?.into_parts();
        let buf: Bytes = match (&self.input, &self.hex) {
            (Some(path), None) => Bytes::from(std::fs::read(path)?),
            (None, Some(hex)) => Bytes::from(hex_arg_bytes(hex)?),
            _ => bail!("provide exactly one of --input or --hex"),
        };
        debug!(
            "decoding {} bytes against {}",
            buf.len(),
            self.schema.display()
        );
        let outcome = parse(&buf, &record_schema, &escapes)?;
        match outcome {
            MatchOutcome::Full { consumed, record } => {
                debug!("matched {consumed} of {} bytes", buf.len());
                println!("{}", serde_json::to_string_pretty(&record)?);
                Ok(())
            }
            MatchOutcome::NeedMoreBytes => bail!("buffer is too short for the schema"),
            MatchOutcome::NotMatch => bail!("buffer does not match the schema"),
        }
    }
}

fn hex_arg_bytes(hex: &str) -> eyre::Result<Vec<u8>> {
    let cleaned: String = hex.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = cleaned.strip_prefix("0x").unwrap_or(&cleaned);
    hex_bytes(digits).ok_or_else(|| eyre::eyre!("invalid hex input: {hex:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_arg_accepts_prefix_and_whitespace() {
        assert_eq!(hex_arg_bytes("55AA").unwrap(), vec![0x55, 0xAA]);
        assert_eq!(hex_arg_bytes("0x55 AA").unwrap(), vec![0x55, 0xAA]);
        assert!(hex_arg_bytes("55A").is_err());
    }
}
