use anchor_lang::prelude::*;

use crate::{
    account_map::AccountSet,
    consts::{DEPOSIT_AUTHORITY, LIDO_VERSION, RESERVE_AUTHORITY},
    errors::LidoError,
    layout::{calculate_size, entry_size, EntryConstantSize, FEE_SECTION_SIZE, LIDO_HEADER_SIZE},
    pda::{
        authority_program_address, find_deposit_authority, find_reserve_authority,
        ProgramAddressFinder,
    },
    rational::Rational,
    state::{FeeDistribution, FeeRecipients, Fees, Validator, Validators},
};

pub type Maintainers = AccountSet;

/// The pool. Not an anchor `#[account]`: the persisted layout has no
/// discriminator, the version byte comes first.
#[derive(Clone, Debug, Default, Eq, PartialEq, AnchorSerialize, AnchorDeserialize)]
pub struct Lido {
    /// Version of the account layout, always [`LIDO_VERSION`]
    pub lido_version: u8,

    /// The only signer allowed to change fees, validators and maintainers
    pub manager: Pubkey,

    /// The stSOL mint. Never changes after initialization
    pub st_sol_mint: Pubkey,

    /// Total stSOL owed to holders: the minted supply plus the validator
    /// fee credits that are not claimed yet
    pub total_shares: u64,

    pub reserve_authority_bump_seed: u8,
    pub deposit_authority_bump_seed: u8,

    pub fee_distribution: FeeDistribution,
    pub fee_recipients: FeeRecipients,

    pub validators: Validators,
    pub maintainers: Maintainers,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InitializeArgs {
    pub manager: Pubkey,
    pub st_sol_mint: Pubkey,
    pub fee_distribution: FeeDistribution,
    pub fee_recipients: FeeRecipients,
    pub max_validators: u32,
    pub max_maintainers: u32,
}

/// A validator's fee credit that was just claimed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClaimedFee {
    /// stSOL to mint to `fee_address`
    pub amount: u64,
    pub fee_address: Pubkey,
}

impl Lido {
    /// Creates the pool in `account_data`, which must be zeroed and sized
    /// with [`calculate_size`] for the requested capacities.
    pub fn initialize<F: ProgramAddressFinder + ?Sized>(
        finder: &F,
        program_id: &Pubkey,
        lido_address: &Pubkey,
        account_data: &mut [u8],
        args: InitializeArgs,
    ) -> Result<Lido> {
        Self::check_account_size(
            account_data.len(),
            args.max_validators,
            args.max_maintainers,
        )?;
        Self::check_uninitialized(account_data)?;
        args.fee_distribution.validate()?;
        require_keys_neq!(args.manager, Pubkey::default(), LidoError::InvalidManager);
        require_keys_neq!(
            args.st_sol_mint,
            Pubkey::default(),
            LidoError::InvalidStSolMint
        );

        let (_, reserve_authority_bump_seed) =
            find_reserve_authority(finder, program_id, lido_address)?;
        let (_, deposit_authority_bump_seed) =
            find_deposit_authority(finder, program_id, lido_address)?;

        let lido = Lido {
            lido_version: LIDO_VERSION,
            manager: args.manager,
            st_sol_mint: args.st_sol_mint,
            total_shares: 0,
            reserve_authority_bump_seed,
            deposit_authority_bump_seed,
            fee_distribution: args.fee_distribution,
            fee_recipients: args.fee_recipients,
            validators: Validators::new(args.max_validators),
            maintainers: Maintainers::new(args.max_maintainers),
        };
        lido.save(account_data)?;

        msg!(
            "Initialized Lido {} with capacity for {} validators and {} maintainers",
            lido_address,
            args.max_validators,
            args.max_maintainers
        );
        Ok(lido)
    }

    pub fn is_initialized(&self) -> bool {
        self.lido_version == LIDO_VERSION
            && self.manager != Pubkey::default()
            && self.st_sol_mint != Pubkey::default()
    }

    /// The account must be exactly as large as its capacities require.
    pub fn check_account_size(
        account_len: usize,
        max_validators: u32,
        max_maintainers: u32,
    ) -> Result<()> {
        let expected = calculate_size(max_validators, max_maintainers);
        if account_len != expected {
            msg!(
                "Lido account is {} bytes, but {} validators and {} maintainers need {}",
                account_len,
                max_validators,
                max_maintainers,
                expected
            );
            return err!(LidoError::InvalidAccountSize);
        }
        Ok(())
    }

    pub fn check_uninitialized(account_data: &[u8]) -> Result<()> {
        require!(
            account_data.iter().all(|b| *b == 0),
            LidoError::AlreadyInUse
        );
        Ok(())
    }

    /// Decodes a Lido account that was created with the given capacities.
    pub fn deserialize_lido(
        account_data: &[u8],
        max_validators: u32,
        max_maintainers: u32,
    ) -> Result<Lido> {
        Self::check_account_size(account_data.len(), max_validators, max_maintainers)?;
        require!(
            account_data.first() == Some(&LIDO_VERSION),
            LidoError::InvalidLidoVersion
        );

        let mut rest = account_data;
        let lido =
            Lido::deserialize(&mut rest).map_err(|_| ErrorCode::AccountDidNotDeserialize)?;
        // `save` zeroes everything after the encoding
        require!(
            rest.iter().all(|b| *b == 0),
            ErrorCode::AccountDidNotDeserialize
        );

        require!(
            lido.validators.maximum_entries == max_validators
                && lido.maintainers.maximum_entries == max_maintainers,
            LidoError::CapacityMismatch
        );
        lido.check_within_capacity()?;
        lido.validators.check_unique_keys()?;
        lido.maintainers.check_unique_keys()?;
        require!(
            lido.validators
                .iter_entries()
                .all(|v| v.stake_seeds.begin <= v.stake_seeds.end),
            LidoError::InvalidStakeSeedRange
        );
        Ok(lido)
    }

    /// Reads the `(max_validators, max_maintainers)` stored in an encoded
    /// Lido account, without decoding the rest of it.
    pub fn peek_capacities(account_data: &[u8]) -> Result<(u32, u32)> {
        let mut cursor = account_data
            .get(LIDO_HEADER_SIZE + FEE_SECTION_SIZE..)
            .ok_or(LidoError::InvalidAccountSize)?;
        let max_validators = skip_map::<Validator>(&mut cursor)?;
        let max_maintainers = skip_map::<()>(&mut cursor)?;
        Ok((max_validators, max_maintainers))
    }

    /// Writes the encoding to `account_data` and zeroes the rest of it.
    pub fn save(&self, account_data: &mut [u8]) -> Result<()> {
        Self::check_account_size(
            account_data.len(),
            self.validators.maximum_entries,
            self.maintainers.maximum_entries,
        )?;
        self.check_within_capacity()?;

        let bytes = self
            .try_to_vec()
            .map_err(|_| ErrorCode::AccountDidNotSerialize)?;
        require!(
            bytes.len() <= account_data.len(),
            LidoError::InvalidAccountSize
        );
        let (encoded, rest) = account_data.split_at_mut(bytes.len());
        encoded.copy_from_slice(&bytes);
        rest.fill(0);
        Ok(())
    }

    fn check_within_capacity(&self) -> Result<()> {
        require!(
            self.validators.len() <= self.validators.maximum_entries as usize
                && self.maintainers.len() <= self.maintainers.maximum_entries as usize,
            LidoError::MaximumNumberOfAccountsExceeded
        );
        Ok(())
    }

    /// stSOL to mint for `stake_amount` lamports, when the pool holds
    /// `total_staked_amount` lamports in total.
    ///
    /// The first deposit into an empty pool mints 1 stSOL per lamport.
    /// None means the deposit must be rejected.
    pub fn tokens_for_deposit(&self, stake_amount: u64, total_staked_amount: u64) -> Option<u64> {
        if total_staked_amount == 0 {
            return Some(stake_amount);
        }
        Rational {
            num: self.total_shares,
            denom: total_staked_amount,
        }
        .floor_mul(stake_amount)
    }

    /// Lamports that `shares` stSOL are worth, rounded down. None if there
    /// is no stSOL yet.
    pub fn lamports_for_shares(&self, shares: u64, total_staked_amount: u64) -> Option<u64> {
        Rational {
            num: total_staked_amount,
            denom: self.total_shares,
        }
        .floor_mul(shares)
    }

    /// Accounts for a deposit of `amount` lamports, returns the stSOL minted.
    pub fn deposit(&mut self, amount: u64, total_staked_amount: u64) -> Result<u64> {
        // order matters, must calculate first before mutation
        let shares = self
            .tokens_for_deposit(amount, total_staked_amount)
            .ok_or(LidoError::CalculationFailure)?;
        let total_shares = self
            .total_shares
            .checked_add(shares)
            .ok_or(LidoError::CalculationFailure)?;
        self.total_shares = total_shares;

        msg!("Deposited {} lamports, minted {} stSOL", amount, shares);
        Ok(shares)
    }

    pub fn burn_shares(&mut self, amount: u64) -> Result<()> {
        self.total_shares = self
            .total_shares
            .checked_sub(amount)
            .ok_or(LidoError::CalculationFailure)?;
        msg!("Burned {} stSOL", amount);
        Ok(())
    }

    pub fn add_validator(&mut self, vote_account: Pubkey, fee_address: Pubkey) -> Result<()> {
        self.validators
            .insert(vote_account, Validator::new(fee_address))?;
        msg!("Added validator {}", vote_account);
        Ok(())
    }

    /// Only validators without fee credit or stake can be removed.
    pub fn remove_validator(&mut self, vote_account: &Pubkey) -> Result<Validator> {
        self.validators.get(vote_account)?.check_can_be_removed()?;
        let validator = self.validators.remove(vote_account)?;
        msg!("Removed validator {}", vote_account);
        Ok(validator)
    }

    pub fn add_maintainer(&mut self, maintainer: Pubkey) -> Result<()> {
        self.maintainers.insert(maintainer, ())?;
        msg!("Added maintainer {}", maintainer);
        Ok(())
    }

    pub fn remove_maintainer(&mut self, maintainer: &Pubkey) -> Result<()> {
        self.maintainers.remove(maintainer)?;
        msg!("Removed maintainer {}", maintainer);
        Ok(())
    }

    pub fn change_fee_distribution(
        &mut self,
        fee_distribution: FeeDistribution,
        fee_recipients: FeeRecipients,
    ) -> Result<()> {
        fee_distribution.validate()?;
        self.fee_distribution = fee_distribution;
        self.fee_recipients = fee_recipients;
        msg!(
            "Fee distribution: {:?}, recipients: {:?}",
            self.fee_distribution,
            self.fee_recipients
        );
        Ok(())
    }

    /// Records `amount` lamports staked with the validator in a new stake
    /// account. Returns the seed of that stake account.
    pub fn stake_deposit(&mut self, vote_account: &Pubkey, amount: u64) -> Result<u64> {
        let validator = self.validators.get_mut(vote_account)?;
        let staked_balance = validator
            .staked_balance
            .checked_add(amount)
            .ok_or(LidoError::CalculationFailure)?;
        let seed = validator.next_stake_seed()?;
        validator.staked_balance = staked_balance;

        msg!(
            "Staked {} lamports with {} in stake account seed {}",
            amount,
            vote_account,
            seed
        );
        Ok(seed)
    }

    /// Records that the validator's oldest stake account, holding `amount`
    /// lamports, was withdrawn. Returns its seed.
    pub fn retire_stake_account(&mut self, vote_account: &Pubkey, amount: u64) -> Result<u64> {
        let validator = self.validators.get_mut(vote_account)?;
        let staked_balance = validator
            .staked_balance
            .checked_sub(amount)
            .ok_or(LidoError::CalculationFailure)?;
        let seed = validator.retire_stake_seed()?;
        validator.staked_balance = staked_balance;

        msg!(
            "Retired stake account seed {} of {}, {} lamports",
            seed,
            vote_account,
            amount
        );
        Ok(seed)
    }

    /// Updates the validator's balance to what was observed in its stake
    /// accounts, and returns the increase. A decrease yields no rewards.
    pub fn observe_validator_balance(
        &mut self,
        vote_account: &Pubkey,
        observed_balance: u64,
    ) -> Result<u64> {
        let validator = self.validators.get_mut(vote_account)?;
        let rewards = observed_balance.saturating_sub(validator.staked_balance);
        validator.staked_balance = observed_balance;

        msg!(
            "Observed {} lamports staked with {}, {} in rewards",
            observed_balance,
            vote_account,
            rewards
        );
        Ok(rewards)
    }

    /// Splits `reward` stSOL by the fee distribution.
    ///
    /// The treasury and developer fees are minted right away, each
    /// validator's part is added to its fee credit. The remainder of the
    /// equal split among validators goes to the treasury. Credits count
    /// towards `total_shares` from now on, claiming only mints them.
    pub fn distribute_fees(&mut self, reward: u64) -> Result<Fees> {
        let num_validators = self.validators.len() as u64;
        let fees = self
            .fee_distribution
            .split_reward(reward, num_validators)
            .ok_or(LidoError::CalculationFailure)?;

        let total_shares = fees
            .reward_per_validator
            .checked_mul(num_validators)
            .and_then(|credited| fees.minted_now()?.checked_add(credited))
            .and_then(|owed| self.total_shares.checked_add(owed))
            .ok_or(LidoError::CalculationFailure)?;
        let fee_credits: Vec<u64> = self
            .validators
            .iter_entries()
            .map(|v| v.fee_credit.checked_add(fees.reward_per_validator))
            .collect::<Option<_>>()
            .ok_or(LidoError::CalculationFailure)?;

        for (validator, fee_credit) in self.validators.iter_entries_mut().zip(fee_credits) {
            validator.fee_credit = fee_credit;
        }
        self.total_shares = total_shares;

        msg!("{:?}", fees);
        Ok(fees)
    }

    /// Zeroes the validator's fee credit, to be minted to its fee address.
    /// `total_shares` already includes the credit.
    pub fn claim_validator_fee(&mut self, vote_account: &Pubkey) -> Result<ClaimedFee> {
        let validator = self.validators.get_mut(vote_account)?;
        let claimed = ClaimedFee {
            amount: validator.fee_credit,
            fee_address: validator.fee_address,
        };
        validator.fee_credit = 0;

        msg!(
            "Claimed {} stSOL of fees for {} to {}",
            claimed.amount,
            vote_account,
            claimed.fee_address
        );
        Ok(claimed)
    }

    pub fn reserve_authority<F: ProgramAddressFinder + ?Sized>(
        &self,
        finder: &F,
        program_id: &Pubkey,
        lido_address: &Pubkey,
    ) -> Option<Pubkey> {
        authority_program_address(
            finder,
            program_id,
            lido_address,
            RESERVE_AUTHORITY,
            self.reserve_authority_bump_seed,
        )
    }

    pub fn deposit_authority<F: ProgramAddressFinder + ?Sized>(
        &self,
        finder: &F,
        program_id: &Pubkey,
        lido_address: &Pubkey,
    ) -> Option<Pubkey> {
        authority_program_address(
            finder,
            program_id,
            lido_address,
            DEPOSIT_AUTHORITY,
            self.deposit_authority_bump_seed,
        )
    }
}

/// Advances `cursor` past an encoded [`crate::account_map::AccountMap`],
/// returning its maximum entry count.
fn skip_map<T: EntryConstantSize>(cursor: &mut &[u8]) -> Result<u32> {
    let len = u32::deserialize(cursor).map_err(|_| ErrorCode::AccountDidNotDeserialize)?;
    let entries_size = (len as usize)
        .checked_mul(entry_size::<T>())
        .ok_or(ErrorCode::AccountDidNotDeserialize)?;
    *cursor = cursor
        .get(entries_size..)
        .ok_or(ErrorCode::AccountDidNotDeserialize)?;
    let maximum_entries =
        u32::deserialize(cursor).map_err(|_| ErrorCode::AccountDidNotDeserialize)?;
    Ok(maximum_entries)
}
