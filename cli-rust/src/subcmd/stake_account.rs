use std::fmt;

use clap::Args;
use lido::{find_stake_account_address, SolanaAddressFinder};
use serde::Serialize;
use solana_program::pubkey::Pubkey;

use super::SubcmdExec;
use crate::{
    error::CliError,
    output::{print_output, serialize_b58},
};

#[derive(Args, Debug)]
#[command(long_about = "Derives the address of one of a validator's stake accounts")]
pub struct StakeAccountArgs {
    #[arg(help = "Program id of the Lido program")]
    program_id: Pubkey,

    #[arg(help = "Pubkey of the Lido account")]
    lido: Pubkey,

    #[arg(help = "Vote account of the validator")]
    vote_account: Pubkey,

    #[arg(help = "Seed of the stake account, within the validator's stake seed range")]
    seed: u64,
}

#[derive(Debug, Serialize)]
pub struct StakeAccountOutput {
    #[serde(serialize_with = "serialize_b58")]
    pub stake_account: Pubkey,
    pub bump_seed: u8,
}

impl fmt::Display for StakeAccountOutput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Stake account: {} (bump seed {})",
            self.stake_account, self.bump_seed
        )
    }
}

impl SubcmdExec for StakeAccountArgs {
    fn process_cmd(&self, args: &crate::Args) -> Result<(), CliError> {
        let (stake_account, bump_seed) = find_stake_account_address(
            &SolanaAddressFinder,
            &self.program_id,
            &self.lido,
            &self.vote_account,
            self.seed,
        )?;
        print_output(
            args.output_mode,
            &StakeAccountOutput {
                stake_account,
                bump_seed,
            },
        )
    }
}
