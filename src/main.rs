use clap::Parser;
use color_eyre::eyre::Result;
use teamy_byteparse::cli::command::Command;
use teamy_byteparse::cli::global_args::GlobalArgs;

#[derive(Parser, Debug)]
#[command(
    name = "teamy-byteparse",
    version,
    about = "Schema-driven byte buffer decoder",
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    global_args: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    cli.command.invoke(cli.global_args)
}
