//! A map from address to value with a maximum size fixed at creation.
//!
//! The maximum is part of the encoding, and it determines the size of the
//! account the map lives in. Entries are kept in insertion order, which is
//! preserved when encoding and decoding.

use anchor_lang::prelude::*;

use crate::{
    errors::LidoError,
    layout::{entry_size, EntryConstantSize, ACCOUNT_MAP_OVERHEAD},
};

#[derive(Clone, Debug, Default, Eq, PartialEq, AnchorSerialize, AnchorDeserialize)]
pub struct PubkeyAndEntry<T> {
    pub pubkey: Pubkey,
    pub entry: T,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, AnchorSerialize, AnchorDeserialize)]
pub struct AccountMap<T> {
    pub entries: Vec<PubkeyAndEntry<T>>,
    pub maximum_entries: u32,
}

pub type AccountSet = AccountMap<()>;

impl<T: EntryConstantSize> AccountMap<T> {
    /// Creates an empty map that can hold up to `maximum_entries` entries.
    pub fn new(maximum_entries: u32) -> Self {
        AccountMap {
            entries: Vec::new(),
            maximum_entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.maximum_entries as usize
    }

    fn position(&self, address: &Pubkey) -> Option<usize> {
        self.entries.iter().position(|pe| &pe.pubkey == address)
    }

    pub fn contains(&self, address: &Pubkey) -> bool {
        self.position(address).is_some()
    }

    pub fn insert(&mut self, address: Pubkey, value: T) -> Result<()> {
        require!(!self.contains(&address), LidoError::DuplicateEntry);
        require!(!self.is_full(), LidoError::MaximumNumberOfAccountsExceeded);
        self.entries.push(PubkeyAndEntry {
            pubkey: address,
            entry: value,
        });
        Ok(())
    }

    /// Removes the entry, keeping the order of the remaining ones.
    pub fn remove(&mut self, address: &Pubkey) -> Result<T> {
        let idx = self
            .position(address)
            .ok_or(LidoError::InvalidAccountMember)?;
        Ok(self.entries.remove(idx).entry)
    }

    pub fn get(&self, address: &Pubkey) -> Result<&T> {
        self.entries
            .iter()
            .find(|pe| &pe.pubkey == address)
            .map(|pe| &pe.entry)
            .ok_or_else(|| LidoError::InvalidAccountMember.into())
    }

    pub fn get_mut(&mut self, address: &Pubkey) -> Result<&mut T> {
        self.entries
            .iter_mut()
            .find(|pe| &pe.pubkey == address)
            .map(|pe| &mut pe.entry)
            .ok_or_else(|| LidoError::InvalidAccountMember.into())
    }

    /// Fails if two entries share a key. `insert` never lets that happen,
    /// but decoded bytes might.
    pub fn check_unique_keys(&self) -> Result<()> {
        for (i, pe) in self.entries.iter().enumerate() {
            require!(
                !self.entries[..i].iter().any(|other| other.pubkey == pe.pubkey),
                LidoError::DuplicateEntry
            );
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PubkeyAndEntry<T>> {
        self.entries.iter()
    }

    pub fn iter_entries(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|pe| &pe.entry)
    }

    pub fn iter_entries_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.iter_mut().map(|pe| &mut pe.entry)
    }

    pub fn keys(&self) -> impl Iterator<Item = &Pubkey> {
        self.entries.iter().map(|pe| &pe.pubkey)
    }

    /// Bytes needed to hold `maximum_entries` entries plus the overhead.
    pub fn required_bytes(maximum_entries: u32) -> usize {
        ACCOUNT_MAP_OVERHEAD + maximum_entries as usize * entry_size::<T>()
    }
}
