use anchor_lang::prelude::*;

use crate::{errors::LidoError, rational::Rational};

/// Determines how rewards are split up among these parties, represented as the
/// number of parts of the total. For example, if each party has 1 part, then
/// they all get an equal share of the reward.
#[derive(Clone, Default, Debug, Eq, PartialEq, AnchorSerialize, AnchorDeserialize)]
pub struct FeeDistribution {
    pub treasury_fee: u32,
    pub validation_fee: u32,
    pub developer_fee: u32,
}

/// Specifies the fee recipients, accounts that should be created by Lido's minter
#[derive(Clone, Default, Debug, Eq, PartialEq, AnchorSerialize, AnchorDeserialize)]
pub struct FeeRecipients {
    pub treasury_account: Pubkey,
    pub developer_account: Pubkey,
}

/// The result of [`FeeDistribution::split_reward`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fees {
    pub treasury_amount: u64,
    pub developer_amount: u64,

    /// The part of the reward that goes to validators, before dividing it
    /// among them.
    pub validation_amount: u64,

    /// What each validator gets credited: `validation_amount / #validators`.
    pub reward_per_validator: u64,

    /// What is left of `validation_amount` after the equal split. Paid to
    /// the treasury, so the validation fee is minted in full.
    pub validation_remainder: u64,
}

impl Fees {
    /// Amount to mint to the treasury: its own share plus the remainder of
    /// the validation fee.
    pub fn treasury_total(&self) -> Option<u64> {
        self.treasury_amount.checked_add(self.validation_remainder)
    }

    /// Amount minted right away, validator credits are minted when claimed.
    pub fn minted_now(&self) -> Option<u64> {
        self.treasury_total()?.checked_add(self.developer_amount)
    }
}

impl FeeDistribution {
    pub fn sum(&self) -> u64 {
        // These adds don't overflow because we widen from u32 to u64 first.
        self.treasury_fee as u64 + self.validation_fee as u64 + self.developer_fee as u64
    }

    pub fn validate(&self) -> Result<()> {
        require!(self.sum() != 0, LidoError::InvalidFeeDistribution);
        Ok(())
    }

    fn share_of(&self, weight: u32, amount: u64) -> Option<u64> {
        Rational {
            num: weight as u64,
            denom: self.sum(),
        }
        .floor_mul(amount)
    }

    /// Splits `amount` by the fee weights, each party rounded down, then
    /// divides the validation part equally among `num_validators`.
    ///
    /// Returns None if all weights are 0. With no validators, the whole
    /// validation part ends up in `validation_remainder`.
    pub fn split_reward(&self, amount: u64, num_validators: u64) -> Option<Fees> {
        let treasury_amount = self.share_of(self.treasury_fee, amount)?;
        let developer_amount = self.share_of(self.developer_fee, amount)?;
        let validation_amount = self.share_of(self.validation_fee, amount)?;

        let (reward_per_validator, validation_remainder) = match num_validators {
            0 => (0, validation_amount),
            n => (validation_amount / n, validation_amount % n),
        };

        Some(Fees {
            treasury_amount,
            developer_amount,
            validation_amount,
            reward_per_validator,
            validation_remainder,
        })
    }
}
