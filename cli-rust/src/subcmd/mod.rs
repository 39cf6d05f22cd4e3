use clap::Subcommand;

use crate::error::CliError;

mod calc_size;
mod show;
mod stake_account;

pub use calc_size::*;
pub use show::*;
pub use stake_account::*;

#[derive(Debug, Subcommand)]
pub enum Subcmd {
    CalcSize(CalcSizeArgs),
    Show(ShowArgs),
    StakeAccount(StakeAccountArgs),
}

pub trait SubcmdExec {
    fn process_cmd(&self, args: &crate::Args) -> Result<(), CliError>;
}

impl SubcmdExec for Subcmd {
    fn process_cmd(&self, args: &crate::Args) -> Result<(), CliError> {
        match self {
            Self::CalcSize(a) => a.process_cmd(args),
            Self::Show(a) => a.process_cmd(args),
            Self::StakeAccount(a) => a.process_cmd(args),
        }
    }
}
