/// Layout version of the Lido account. Written as the first byte, any
/// other value is rejected when decoding.
pub const LIDO_VERSION: u8 = 0;

/// Seed for the reserve authority.
/// Custodian of the deposited SOL, and the mint authority of stSOL.
pub const RESERVE_AUTHORITY: &[u8] = b"reserve_authority";

/// Seed for the deposit authority.
/// Stake authority of every stake account owned by the pool.
pub const DEPOSIT_AUTHORITY: &[u8] = b"deposit_authority";

/// Additional seed for validator stake accounts.
pub const VALIDATOR_STAKE_ACCOUNT: &[u8] = b"validator_stake_account";
