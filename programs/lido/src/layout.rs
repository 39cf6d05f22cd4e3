//! Byte sizes of the persisted Lido account.
//!
//! The account is allocated once, at creation, for fixed validator and
//! maintainer capacities. Every field has a constant encoded size, so the
//! size of the account is a function of those two capacities alone.

use crate::{account_map::AccountMap, state::Validator};

/// Encoded size of an entry stored in an [`crate::account_map::AccountMap`].
pub trait EntryConstantSize {
    const SIZE: usize;
}

impl EntryConstantSize for () {
    const SIZE: usize = 0;
}

pub const PUBKEY_SIZE: usize = 32;

/// `u32` length prefix of the entries plus the `u32` maximum entry count.
pub const ACCOUNT_MAP_OVERHEAD: usize = 4 + 4;

/// version, manager, st_sol_mint, total_shares, two bump seeds
pub const LIDO_HEADER_SIZE: usize = 1 + PUBKEY_SIZE + PUBKEY_SIZE + 8 + 1 + 1;

/// three `u32` fee weights, then the treasury and developer accounts
pub const FEE_SECTION_SIZE: usize = 3 * 4 + 2 * PUBKEY_SIZE;

/// Size of a Lido account that can hold no validators and no maintainers.
pub const LIDO_CONSTANT_SIZE: usize =
    LIDO_HEADER_SIZE + FEE_SECTION_SIZE + 2 * ACCOUNT_MAP_OVERHEAD;

/// fee_credit, fee_address, stake seed range, staked_balance
pub const VALIDATOR_CONSTANT_SIZE: usize = 8 + PUBKEY_SIZE + 8 + 8 + 8;

/// Bytes taken by one map entry: the key followed by the value.
pub const fn entry_size<T: EntryConstantSize>() -> usize {
    PUBKEY_SIZE + T::SIZE
}

/// Exact size of a Lido account with the given capacities.
pub fn calculate_size(max_validators: u32, max_maintainers: u32) -> usize {
    LIDO_HEADER_SIZE
        + FEE_SECTION_SIZE
        + AccountMap::<Validator>::required_bytes(max_validators)
        + AccountMap::<()>::required_bytes(max_maintainers)
}
