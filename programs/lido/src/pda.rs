//! Program derived addresses of a Lido instance.
//!
//! The authorities (reserve, deposit) are found once when the instance is
//! created, and their bump seeds are stored in the Lido account, so
//! validating them later is a single `create_program_address`. Validator
//! stake accounts are not stored anywhere, they are derived from the
//! validator's vote account and a seed, and their bump is searched for
//! every time.

use anchor_lang::prelude::*;

use crate::{
    consts::{DEPOSIT_AUTHORITY, RESERVE_AUTHORITY, VALIDATOR_STAKE_ACCOUNT},
    errors::LidoError,
};

/// Turns seeds into off-curve addresses.
///
/// Only `create_program_address` is needed; the default `find_program_address`
/// tries bump seeds from 255 down to 0 and returns the first one that
/// yields an address.
pub trait ProgramAddressFinder {
    /// Returns None if the seeds hash to a point on the curve.
    fn create_program_address(&self, seeds: &[&[u8]], program_id: &Pubkey) -> Option<Pubkey>;

    /// Cost depends on how many bumps are rejected, and is not bounded by
    /// anything but the size of the bump space. Returns None if no bump works.
    fn find_program_address(&self, seeds: &[&[u8]], program_id: &Pubkey) -> Option<(Pubkey, u8)> {
        for bump in (0..=u8::MAX).rev() {
            let bump_seed = [bump];
            let mut seeds_with_bump = seeds.to_vec();
            seeds_with_bump.push(&bump_seed);
            if let Some(address) = self.create_program_address(&seeds_with_bump, program_id) {
                return Some((address, bump));
            }
        }
        None
    }
}

/// The runtime's derivation, via the `Pubkey` syscalls when on-chain.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolanaAddressFinder;

impl ProgramAddressFinder for SolanaAddressFinder {
    fn create_program_address(&self, seeds: &[&[u8]], program_id: &Pubkey) -> Option<Pubkey> {
        Pubkey::create_program_address(seeds, program_id).ok()
    }

    fn find_program_address(&self, seeds: &[&[u8]], program_id: &Pubkey) -> Option<(Pubkey, u8)> {
        Pubkey::try_find_program_address(seeds, program_id)
    }
}

/// Finds the address and bump seed of one of the authorities of `lido_address`.
pub fn find_authority_program_address<F: ProgramAddressFinder + ?Sized>(
    finder: &F,
    program_id: &Pubkey,
    lido_address: &Pubkey,
    authority: &[u8],
) -> Result<(Pubkey, u8)> {
    finder
        .find_program_address(&[&lido_address.to_bytes(), authority], program_id)
        .ok_or_else(|| error!(LidoError::NoValidBumpSeed))
}

/// Re-derives an authority from its stored bump seed. None if the bump
/// does not yield a program address.
pub fn authority_program_address<F: ProgramAddressFinder + ?Sized>(
    finder: &F,
    program_id: &Pubkey,
    lido_address: &Pubkey,
    authority: &[u8],
    bump_seed: u8,
) -> Option<Pubkey> {
    finder.create_program_address(
        &[&lido_address.to_bytes(), authority, &[bump_seed]],
        program_id,
    )
}

pub fn find_reserve_authority<F: ProgramAddressFinder + ?Sized>(
    finder: &F,
    program_id: &Pubkey,
    lido_address: &Pubkey,
) -> Result<(Pubkey, u8)> {
    find_authority_program_address(finder, program_id, lido_address, RESERVE_AUTHORITY)
}

pub fn find_deposit_authority<F: ProgramAddressFinder + ?Sized>(
    finder: &F,
    program_id: &Pubkey,
    lido_address: &Pubkey,
) -> Result<(Pubkey, u8)> {
    find_authority_program_address(finder, program_id, lido_address, DEPOSIT_AUTHORITY)
}

/// Finds the stake account of `validator_vote_account` for the given seed.
///
/// The seed is taken from the validator's `stake_seeds`; the caller should
/// expect this to cost a variable amount of compute.
pub fn find_stake_account_address<F: ProgramAddressFinder + ?Sized>(
    finder: &F,
    program_id: &Pubkey,
    lido_address: &Pubkey,
    validator_vote_account: &Pubkey,
    seed: u64,
) -> Result<(Pubkey, u8)> {
    let seeds: [&[u8]; 4] = [
        &lido_address.to_bytes(),
        &validator_vote_account.to_bytes(),
        VALIDATOR_STAKE_ACCOUNT,
        &seed.to_le_bytes(),
    ];
    finder
        .find_program_address(&seeds, program_id)
        .ok_or_else(|| error!(LidoError::NoValidBumpSeed))
}


#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{test_utils::RejectBumpsAbove, *};

    #[test]
    fn search_walks_down_to_first_valid_bump() {
        let finder = RejectBumpsAbove(Some(200));
        let program_id = Pubkey::new_unique();
        let lido = Pubkey::new_unique();
        let (address, bump) = find_reserve_authority(&finder, &program_id, &lido).unwrap();
        assert_eq!(bump, 200);
        assert_eq!(
            authority_program_address(&finder, &program_id, &lido, RESERVE_AUTHORITY, bump),
            Some(address)
        );
        assert_eq!(
            authority_program_address(&finder, &program_id, &lido, RESERVE_AUTHORITY, 201),
            None
        );
    }

    #[test]
    fn exhausted_search_is_an_error() {
        let finder = RejectBumpsAbove(None);
        let result = find_stake_account_address(
            &finder,
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            &Pubkey::new_unique(),
            0,
        );
        assert_eq!(result.unwrap_err(), Error::from(LidoError::NoValidBumpSeed));
    }

    #[test]
    fn authorities_differ() {
        let program_id = Pubkey::new_unique();
        let lido = Pubkey::new_unique();
        let (reserve, _) =
            find_reserve_authority(&SolanaAddressFinder, &program_id, &lido).unwrap();
        let (deposit, _) =
            find_deposit_authority(&SolanaAddressFinder, &program_id, &lido).unwrap();
        assert_ne!(reserve, deposit);
    }

    #[test]
    fn solana_finder_agrees_with_stored_bump() {
        let program_id = Pubkey::new_unique();
        let lido = Pubkey::new_unique();
        let (reserve, bump) =
            find_reserve_authority(&SolanaAddressFinder, &program_id, &lido).unwrap();
        assert_eq!(
            authority_program_address(
                &SolanaAddressFinder,
                &program_id,
                &lido,
                RESERVE_AUTHORITY,
                bump
            ),
            Some(reserve)
        );
    }

    #[test]
    fn stake_accounts_differ_per_seed() {
        let program_id = Pubkey::new_unique();
        let lido = Pubkey::new_unique();
        let vote = Pubkey::new_unique();
        let (a, _) =
            find_stake_account_address(&SolanaAddressFinder, &program_id, &lido, &vote, 0).unwrap();
        let (b, _) =
            find_stake_account_address(&SolanaAddressFinder, &program_id, &lido, &vote, 1).unwrap();
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn stake_account_derivation_is_deterministic(
            program_id: [u8; 32],
            lido: [u8; 32],
            vote: [u8; 32],
            seed: u64,
        ) {
            let program_id = Pubkey::new_from_array(program_id);
            let lido = Pubkey::new_from_array(lido);
            let vote = Pubkey::new_from_array(vote);
            let derive = || {
                find_stake_account_address(&SolanaAddressFinder, &program_id, &lido, &vote, seed)
                    .unwrap()
            };
            let first = derive();
            let second = derive();
            prop_assert_eq!(first, second);
        }
    }
}
