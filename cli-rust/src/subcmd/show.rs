use std::fmt;

use clap::Args;
use lido::{check_is_initialized, errors::LidoError, Lido, SolanaAddressFinder};
use log::{debug, info};
use serde::Serialize;
use solana_program::{
    native_token::{lamports_to_sol, LAMPORTS_PER_SOL},
    program_pack::Pack,
    pubkey::Pubkey,
};
use spl_token::state::Mint;

use super::SubcmdExec;
use crate::{
    error::CliError,
    output::{print_output, serialize_b58},
};

#[derive(Args, Debug)]
#[command(long_about = "View details about a Lido instance")]
pub struct ShowArgs {
    #[arg(help = "Pubkey of the Lido account")]
    lido: Pubkey,
}

#[derive(Debug, Serialize)]
pub struct ValidatorOutput {
    #[serde(serialize_with = "serialize_b58")]
    pub vote_account: Pubkey,
    #[serde(serialize_with = "serialize_b58")]
    pub fee_address: Pubkey,
    pub fee_credit: u64,
    pub stake_seeds_begin: u64,
    pub stake_seeds_end: u64,
    pub staked_balance: u64,
}

#[derive(Debug, Serialize)]
pub struct ShowOutput {
    #[serde(serialize_with = "serialize_b58")]
    pub lido_address: Pubkey,
    #[serde(serialize_with = "serialize_b58")]
    pub program_id: Pubkey,
    pub lido_version: u8,
    #[serde(serialize_with = "serialize_b58")]
    pub manager: Pubkey,
    #[serde(serialize_with = "serialize_b58")]
    pub st_sol_mint: Pubkey,
    #[serde(serialize_with = "serialize_b58")]
    pub reserve_authority: Pubkey,
    #[serde(serialize_with = "serialize_b58")]
    pub deposit_authority: Pubkey,

    pub total_shares: u64,
    pub st_sol_supply: u64,
    pub reserve_lamports: u64,
    pub total_staked_lamports: u64,
    /// None while no stSOL exists
    pub lamports_per_st_sol: Option<u64>,

    pub treasury_fee: u32,
    pub validation_fee: u32,
    pub developer_fee: u32,
    #[serde(serialize_with = "serialize_b58")]
    pub treasury_account: Pubkey,
    #[serde(serialize_with = "serialize_b58")]
    pub developer_account: Pubkey,

    pub max_validators: u32,
    pub validators: Vec<ValidatorOutput>,
    pub max_maintainers: u32,
    pub maintainers: Vec<String>,
}

impl fmt::Display for ShowOutput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Lido: {} (version {})", self.lido_address, self.lido_version)?;
        writeln!(f, "Program: {}", self.program_id)?;
        writeln!(f, "Manager: {}", self.manager)?;
        writeln!(f, "stSOL mint: {}", self.st_sol_mint)?;
        writeln!(f, "Reserve authority: {}", self.reserve_authority)?;
        writeln!(f, "Deposit authority: {}", self.deposit_authority)?;
        writeln!(
            f,
            "Total shares: {} (mint supply {})",
            self.total_shares, self.st_sol_supply
        )?;
        writeln!(f, "Reserve: {} SOL", lamports_to_sol(self.reserve_lamports))?;
        writeln!(
            f,
            "Total staked: {} SOL",
            lamports_to_sol(self.total_staked_lamports)
        )?;
        match self.lamports_per_st_sol {
            Some(lamports) => writeln!(f, "1 stSOL = {} SOL", lamports_to_sol(lamports))?,
            None => writeln!(f, "1 stSOL = 1 SOL (no stSOL minted yet)")?,
        }
        writeln!(
            f,
            "Fee distribution (treasury:validation:developer): {}:{}:{}",
            self.treasury_fee, self.validation_fee, self.developer_fee
        )?;
        writeln!(f, "Treasury account: {}", self.treasury_account)?;
        writeln!(f, "Developer account: {}", self.developer_account)?;

        writeln!(
            f,
            "Validators: {} of {}",
            self.validators.len(),
            self.max_validators
        )?;
        for v in &self.validators {
            writeln!(
                f,
                "  {}: fee address {}, fee credit {}, staked {} SOL, stake seeds [{}, {})",
                v.vote_account,
                v.fee_address,
                v.fee_credit,
                lamports_to_sol(v.staked_balance),
                v.stake_seeds_begin,
                v.stake_seeds_end
            )?;
        }

        write!(
            f,
            "Maintainers: {} of {}",
            self.maintainers.len(),
            self.max_maintainers
        )?;
        for m in &self.maintainers {
            write!(f, "\n  {}", m)?;
        }
        Ok(())
    }
}

impl SubcmdExec for ShowArgs {
    fn process_cmd(&self, args: &crate::Args) -> Result<(), CliError> {
        let client = args.config.rpc_client()?;

        info!("Fetching Lido account {}", self.lido);
        let lido_account = client.get_account(&self.lido)?;
        let program_id = lido_account.owner;

        let (max_validators, max_maintainers) = Lido::peek_capacities(&lido_account.data)?;
        debug!(
            "Lido account is {} bytes, for {} validators and {} maintainers",
            lido_account.data.len(),
            max_validators,
            max_maintainers
        );
        let lido = Lido::deserialize_lido(&lido_account.data, max_validators, max_maintainers)?;
        check_is_initialized(&lido)?;

        let reserve_authority = lido
            .reserve_authority(&SolanaAddressFinder, &program_id, &self.lido)
            .ok_or_else(|| anchor_lang::error!(LidoError::InvalidReserveAuthority))?;
        let deposit_authority = lido
            .deposit_authority(&SolanaAddressFinder, &program_id, &self.lido)
            .ok_or_else(|| anchor_lang::error!(LidoError::InvalidDepositAuthority))?;

        let mint_account = client.get_account(&lido.st_sol_mint)?;
        let st_sol_supply = Mint::unpack(&mint_account.data)?.supply;

        let reserve_lamports = client.get_balance(&reserve_authority)?;
        let total_staked_lamports = lido
            .validators
            .iter_entries()
            .try_fold(reserve_lamports, |total, v| {
                total.checked_add(v.staked_balance)
            })
            .ok_or(CliError::CalculationFailure)?;

        let output = ShowOutput {
            lido_address: self.lido,
            program_id,
            lido_version: lido.lido_version,
            manager: lido.manager,
            st_sol_mint: lido.st_sol_mint,
            reserve_authority,
            deposit_authority,
            total_shares: lido.total_shares,
            st_sol_supply,
            reserve_lamports,
            total_staked_lamports,
            lamports_per_st_sol: lido.lamports_for_shares(LAMPORTS_PER_SOL, total_staked_lamports),
            treasury_fee: lido.fee_distribution.treasury_fee,
            validation_fee: lido.fee_distribution.validation_fee,
            developer_fee: lido.fee_distribution.developer_fee,
            treasury_account: lido.fee_recipients.treasury_account,
            developer_account: lido.fee_recipients.developer_account,
            max_validators,
            validators: lido
                .validators
                .iter()
                .map(|pe| ValidatorOutput {
                    vote_account: pe.pubkey,
                    fee_address: pe.entry.fee_address,
                    fee_credit: pe.entry.fee_credit,
                    stake_seeds_begin: pe.entry.stake_seeds.begin,
                    stake_seeds_end: pe.entry.stake_seeds.end,
                    staked_balance: pe.entry.staked_balance,
                })
                .collect(),
            max_maintainers,
            maintainers: lido.maintainers.keys().map(|k| k.to_string()).collect(),
        };
        print_output(args.output_mode, &output)
    }
}
