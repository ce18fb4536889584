use crate::cli::command::check::CheckArgs;
use crate::cli::command::decode::DecodeArgs;
use crate::cli::global_args::GlobalArgs;
use crate::init_tracing;
use arbitrary::Arbitrary;
use clap::Subcommand;

/// Teamy byteparse commands
#[derive(Subcommand, Arbitrary, PartialEq, Debug)]
pub enum Command {
    /// Decode bytes against a schema file and print the record as JSON
    Decode(DecodeArgs),
    /// Validate a schema file without decoding anything
    Check(CheckArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Check(CheckArgs::default())
    }
}

impl Command {
    pub fn invoke(self, global_args: GlobalArgs) -> eyre::Result<()> {
        init_tracing(global_args.log_level())?;
        match self {
            Command::Decode(args) => args.invoke(),
            Command::Check(args) => args.invoke(),
        }
    }
}
