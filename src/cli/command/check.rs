use crate::byteparse::SchemaFile;
use arbitrary::Arbitrary;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Arbitrary, PartialEq, Debug, Default)]
pub struct CheckArgs {
    /// Path to the schema JSON file (first positional)
    pub schema: PathBuf,
}

impl CheckArgs {
    pub fn invoke(self) -> eyre::Result<()> {
        let (record_schema, escapes) = SchemaFile::load(&self.schema)?.into_parts();
        record_schema.check(&escapes)?;
        info!("schema {} checks out", self.schema.display());
        println!("schema ok: {} fields", record_schema.fields.len());
        Ok(())
    }
}
