//! Checks run by instructions before they touch the pool.
//!
//! None of these has side effects; each one fails with the error that
//! names what was wrong with the provided account.

use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::{
    consts::LIDO_VERSION, errors::LidoError, pda::ProgramAddressFinder, state::Lido,
};

pub fn check_is_initialized(lido: &Lido) -> Result<()> {
    require!(
        lido.lido_version == LIDO_VERSION,
        LidoError::InvalidLidoVersion
    );
    require!(lido.is_initialized(), LidoError::LidoNotInitialized);
    Ok(())
}

pub fn check_mint_is_st_sol_mint(lido: &Lido, mint: &Pubkey) -> Result<()> {
    require_keys_eq!(*mint, lido.st_sol_mint, LidoError::InvalidStSolMint);
    Ok(())
}

/// Checks what the token account holds, not its address.
pub fn check_is_st_sol_account(lido: &Lido, token_account: &TokenAccount) -> Result<()> {
    require_keys_eq!(
        token_account.mint,
        lido.st_sol_mint,
        LidoError::InvalidStSolAccount
    );
    Ok(())
}

/// `signer` must have signed the transaction; that is up to the caller.
pub fn check_manager(lido: &Lido, signer: &Pubkey) -> Result<()> {
    require_keys_neq!(*signer, Pubkey::default(), LidoError::InvalidManager);
    require_keys_eq!(*signer, lido.manager, LidoError::InvalidManager);
    Ok(())
}

pub fn check_maintainer(lido: &Lido, signer: &Pubkey) -> Result<()> {
    require!(
        lido.maintainers.contains(signer),
        LidoError::InvalidMaintainer
    );
    Ok(())
}

pub fn check_reserve_authority<F: ProgramAddressFinder + ?Sized>(
    lido: &Lido,
    finder: &F,
    program_id: &Pubkey,
    lido_address: &Pubkey,
    provided: &Pubkey,
) -> Result<()> {
    let expected = lido
        .reserve_authority(finder, program_id, lido_address)
        .ok_or(LidoError::InvalidReserveAuthority)?;
    require_keys_eq!(*provided, expected, LidoError::InvalidReserveAuthority);
    Ok(())
}

pub fn check_deposit_authority<F: ProgramAddressFinder + ?Sized>(
    lido: &Lido,
    finder: &F,
    program_id: &Pubkey,
    lido_address: &Pubkey,
    provided: &Pubkey,
) -> Result<()> {
    let expected = lido
        .deposit_authority(finder, program_id, lido_address)
        .ok_or(LidoError::InvalidDepositAuthority)?;
    require_keys_eq!(*provided, expected, LidoError::InvalidDepositAuthority);
    Ok(())
}
