use std::{io, str::FromStr};

use derive_more::{AsRef, Deref};
use solana_cli_config::{Config, CONFIG_FILE};
use solana_client::rpc_client::RpcClient;
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};

use crate::error::CliError;

/// clap requires arg types to impl Clone, but solana doesnt do it
#[derive(AsRef, Debug, Deref)]
pub struct ConfigWrapper(Config);

impl Clone for ConfigWrapper {
    fn clone(&self) -> Self {
        Self(Config {
            json_rpc_url: self.0.json_rpc_url.clone(),
            websocket_url: self.0.websocket_url.clone(),
            keypair_path: self.0.keypair_path.clone(),
            address_labels: self.0.address_labels.clone(),
            commitment: self.0.commitment.clone(),
        })
    }
}

impl ConfigWrapper {
    pub fn rpc_client(&self) -> Result<RpcClient, CliError> {
        let commitment = CommitmentLevel::from_str(&self.commitment)
            .map_err(|_| CliError::InvalidCommitment(self.commitment.clone()))?;
        Ok(RpcClient::new_with_commitment(
            &self.json_rpc_url,
            CommitmentConfig { commitment },
        ))
    }
}

/// An empty path means the default config file. Offline subcommands don't
/// need one, so a missing default file falls back to the default config.
pub fn parse_solana_cli_config_from_path(path: &str) -> Result<ConfigWrapper, io::Error> {
    if !path.is_empty() {
        return Ok(ConfigWrapper(Config::load(path)?));
    }
    let default_path = CONFIG_FILE.as_ref().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::Other,
            "Solana CONFIG_FILE could not identify the user's home directory",
        )
    })?;
    Ok(ConfigWrapper(Config::load(default_path).unwrap_or_default()))
}
