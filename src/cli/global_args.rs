use arbitrary::Arbitrary;
use clap::Args;
use tracing::Level;

/// Flags shared by every subcommand.
#[derive(Args, Arbitrary, PartialEq, Debug, Default, Clone)]
pub struct GlobalArgs {
    /// Enable debug logging
    #[clap(long, global = true)]
    pub debug: bool,
}

impl GlobalArgs {
    #[must_use]
    pub fn log_level(&self) -> Level {
        if self.debug {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }
}
