use std::fmt;

use clap::Args;
use lido::layout::calculate_size;
use serde::Serialize;

use super::SubcmdExec;
use crate::{error::CliError, output::print_output};

#[derive(Args, Debug)]
#[command(long_about = "Computes the size of a Lido account, to allocate it before initializing")]
pub struct CalcSizeArgs {
    #[arg(help = "Maximum number of validators the pool can hold")]
    max_validators: u32,

    #[arg(help = "Maximum number of maintainers the pool can hold")]
    max_maintainers: u32,
}

#[derive(Debug, Serialize)]
pub struct CalcSizeOutput {
    pub max_validators: u32,
    pub max_maintainers: u32,
    pub size: usize,
}

impl fmt::Display for CalcSizeOutput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "A Lido account for {} validators and {} maintainers takes {} bytes",
            self.max_validators, self.max_maintainers, self.size
        )
    }
}

impl SubcmdExec for CalcSizeArgs {
    fn process_cmd(&self, args: &crate::Args) -> Result<(), CliError> {
        let output = CalcSizeOutput {
            max_validators: self.max_validators,
            max_maintainers: self.max_maintainers,
            size: calculate_size(self.max_validators, self.max_maintainers),
        };
        print_output(args.output_mode, &output)
    }
}
