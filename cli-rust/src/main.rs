use std::process::ExitCode;

use clap::{builder::ValueParser, Parser};

mod argparse;
mod error;
mod output;
mod subcmd;

use argparse::{parse_solana_cli_config_from_path, ConfigWrapper};
use output::OutputMode;
use subcmd::{Subcmd, SubcmdExec};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = "Solido: inspect a Lido for Solana liquid staking pool"
)]
pub struct Args {
    #[arg(
        long,
        short,
        help = "path to solana CLI config",
        default_value = "",
        value_parser = ValueParser::new(parse_solana_cli_config_from_path)
    )]
    pub config: ConfigWrapper,

    #[arg(
        long = "output",
        help = "whether to print human-readable text or json",
        value_enum,
        default_value_t = OutputMode::Text
    )]
    pub output_mode: OutputMode,

    #[command(subcommand)]
    pub subcmd: Subcmd,
}

fn main() -> ExitCode {
    let args = Args::parse();
    solana_logger::setup_with_default("solana=info");

    match args.subcmd.process_cmd(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
