use anchor_lang::prelude::*;

#[error_code]
pub enum LidoError {
    #[msg("The Lido account is already in use")]
    AlreadyInUse, // 0x1770

    #[msg("The account size does not match the size required by its capacities")]
    InvalidAccountSize, // 0x1771

    #[msg("The capacities stored in the account do not match the expected capacities")]
    CapacityMismatch, // 0x1772

    #[msg("Unsupported Lido account version")]
    InvalidLidoVersion, // 0x1773

    #[msg("The Lido account is not initialized")]
    LidoNotInitialized, // 0x1774

    #[msg("The provided signer is not the manager of this Lido instance")]
    InvalidManager, // 0x1775

    #[msg("The provided signer is not a maintainer of this Lido instance")]
    InvalidMaintainer, // 0x1776

    #[msg("The provided mint is not the stSOL mint")]
    InvalidStSolMint, // 0x1777

    #[msg("The provided token account does not hold stSOL")]
    InvalidStSolAccount, // 0x1778

    #[msg("The provided account is not the reserve authority")]
    InvalidReserveAuthority, // 0x1779

    #[msg("The provided account is not the deposit authority")]
    InvalidDepositAuthority, // 0x177a

    #[msg("An entry with this address already exists")]
    DuplicateEntry, // 0x177b

    #[msg("The maximum number of entries has been reached")]
    MaximumNumberOfAccountsExceeded, // 0x177c

    #[msg("No entry exists for this address")]
    InvalidAccountMember, // 0x177d

    #[msg("The validator still has fee credit that was not claimed")]
    ValidatorHasUnclaimedCredit, // 0x177e

    #[msg("The validator still has stake delegated to it")]
    ValidatorHasStake, // 0x177f

    #[msg("The validator has no stake account in its seed range")]
    InvalidStakeSeedRange, // 0x1780

    #[msg("At least one fee weight must be nonzero")]
    InvalidFeeDistribution, // 0x1781

    #[msg("Overflow or underflow while updating the pool accounting")]
    CalculationFailure, // 0x1782

    #[msg("Could not find a bump seed that yields a program address")]
    NoValidBumpSeed, // 0x1783
}
