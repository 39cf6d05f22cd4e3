use std::fmt;

use clap::ValueEnum;
use serde::{Serialize, Serializer};
use solana_program::pubkey::Pubkey;

use crate::error::CliError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-readable text
    Text,

    /// Machine-readable json
    Json,
}

pub fn print_output<T: fmt::Display + Serialize>(
    mode: OutputMode,
    output: &T,
) -> Result<(), CliError> {
    match mode {
        OutputMode::Text => println!("{}", output),
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(output)?),
    }
    Ok(())
}

// NOTE: Pubkey's own Serialize impl writes a byte array, we want Base58
pub fn serialize_b58<S: Serializer>(pubkey: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&pubkey.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Wrapper {
        #[serde(serialize_with = "serialize_b58")]
        key: Pubkey,
    }

    #[test]
    fn pubkeys_are_base58_in_json() {
        let key = Pubkey::new_unique();
        let json = serde_json::to_value(Wrapper { key }).unwrap();
        assert_eq!(json["key"], key.to_string());
    }
}
