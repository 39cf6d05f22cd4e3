use std::ops::Range;

use anchor_lang::prelude::*;

use crate::{
    account_map::AccountMap,
    errors::LidoError,
    layout::{EntryConstantSize, VALIDATOR_CONSTANT_SIZE},
};

pub type Validators = AccountMap<Validator>;

#[derive(Clone, Debug, Default, Eq, PartialEq, AnchorSerialize, AnchorDeserialize)]
pub struct Validator {
    /// Fees in stSOL that the validator is entitled to, but hasn't claimed yet.
    /// Already counted in `Lido::total_shares`.
    pub fee_credit: u64,

    /// SPL token account denominated in stSOL to transfer fees to when claiming them.
    pub fee_address: Pubkey,

    /// Seeds of the stake accounts currently in use for this validator.
    pub stake_seeds: SeedRange,

    /// Lamports in the validator's stake accounts, as last observed.
    /// Includes rewards that are not yet reflected in `Lido::total_shares`.
    pub staked_balance: u64,
}

impl EntryConstantSize for Validator {
    const SIZE: usize = VALIDATOR_CONSTANT_SIZE;
}

/// Half-open range `[begin, end)` of stake account seeds.
///
/// New stake accounts are only ever created at seed `end`, and stake
/// accounts are only ever retired at seed `begin`. Seeds are not reused, so
/// a maintainer that built an instruction for a stale seed gets rejected
/// instead of staking twice.
#[derive(Clone, Debug, Default, Eq, PartialEq, AnchorSerialize, AnchorDeserialize)]
pub struct SeedRange {
    /// Start (inclusive) of the seed range for stake accounts.
    pub begin: u64,

    /// End (exclusive) of the seed range for stake accounts.
    pub end: u64,
}

impl SeedRange {
    pub fn is_empty(&self) -> bool {
        self.begin >= self.end
    }
}

impl IntoIterator for &SeedRange {
    type Item = u64;
    type IntoIter = Range<u64>;

    fn into_iter(self) -> Self::IntoIter {
        Range {
            start: self.begin,
            end: self.end,
        }
    }
}

impl Validator {
    pub fn new(fee_address: Pubkey) -> Validator {
        Validator {
            fee_address,
            ..Default::default()
        }
    }

    /// Claims the seed at `end` for a new stake account, and returns it.
    pub fn next_stake_seed(&mut self) -> Result<u64> {
        let seed = self.stake_seeds.end;
        self.stake_seeds.end = seed.checked_add(1).ok_or(LidoError::CalculationFailure)?;
        Ok(seed)
    }

    /// Retires the stake account at seed `begin`, and returns its seed.
    pub fn retire_stake_seed(&mut self) -> Result<u64> {
        require!(!self.stake_seeds.is_empty(), LidoError::InvalidStakeSeedRange);
        let seed = self.stake_seeds.begin;
        self.stake_seeds.begin += 1;
        Ok(seed)
    }

    /// A validator can only leave the pool once nothing is owed to it and
    /// nothing is staked with it.
    pub fn check_can_be_removed(&self) -> Result<()> {
        require!(self.fee_credit == 0, LidoError::ValidatorHasUnclaimedCredit);
        require!(self.staked_balance == 0, LidoError::ValidatorHasStake);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_size_is_constant() {
        let validator = Validator {
            fee_credit: u64::MAX,
            fee_address: Pubkey::new_unique(),
            stake_seeds: SeedRange {
                begin: 3,
                end: u64::MAX,
            },
            staked_balance: 1,
        };
        assert_eq!(validator.try_to_vec().unwrap().len(), Validator::SIZE);
        assert_eq!(
            Validator::default().try_to_vec().unwrap().len(),
            Validator::SIZE
        );
    }

    #[test]
    fn seeds_are_allocated_at_end_and_retired_at_begin() {
        let mut validator = Validator::new(Pubkey::new_unique());
        assert!(validator.stake_seeds.is_empty());

        assert_eq!(validator.next_stake_seed().unwrap(), 0);
        assert_eq!(validator.next_stake_seed().unwrap(), 1);
        assert_eq!((&validator.stake_seeds).into_iter().collect::<Vec<_>>(), vec![0, 1]);

        assert_eq!(validator.retire_stake_seed().unwrap(), 0);
        assert_eq!(validator.retire_stake_seed().unwrap(), 1);
        assert_eq!(
            validator.retire_stake_seed().unwrap_err(),
            Error::from(LidoError::InvalidStakeSeedRange)
        );
        assert_eq!(validator.stake_seeds, SeedRange { begin: 2, end: 2 });
    }

    #[test]
    fn seed_end_does_not_wrap() {
        let mut validator = Validator::default();
        validator.stake_seeds.end = u64::MAX;
        assert_eq!(
            validator.next_stake_seed().unwrap_err(),
            Error::from(LidoError::CalculationFailure)
        );
        assert_eq!(validator.stake_seeds.end, u64::MAX);
    }

    #[test]
    fn removal_requires_no_credit_and_no_stake() {
        let mut validator = Validator::new(Pubkey::new_unique());
        assert!(validator.check_can_be_removed().is_ok());

        validator.fee_credit = 1;
        assert_eq!(
            validator.check_can_be_removed().unwrap_err(),
            Error::from(LidoError::ValidatorHasUnclaimedCredit)
        );

        validator.fee_credit = 0;
        validator.staked_balance = 1;
        assert_eq!(
            validator.check_can_be_removed().unwrap_err(),
            Error::from(LidoError::ValidatorHasStake)
        );
    }
}
