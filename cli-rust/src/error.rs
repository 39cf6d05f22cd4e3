use solana_client::client_error::ClientError;
use solana_program::program_error::ProgramError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("RPC request failed: {0}")]
    Rpc(#[from] ClientError),

    #[error("invalid Lido account: {0}")]
    Lido(anchor_lang::error::Error),

    #[error("invalid stSOL mint: {0}")]
    Mint(#[from] ProgramError),

    #[error("unknown commitment level {0:?} in solana CLI config")]
    InvalidCommitment(String),

    #[error("exchange rate overflowed")]
    CalculationFailure,

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<anchor_lang::error::Error> for CliError {
    fn from(err: anchor_lang::error::Error) -> Self {
        Self::Lido(err)
    }
}
