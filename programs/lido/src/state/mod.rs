mod fee;
mod lido;
mod validator;

pub use fee::*;
pub use lido::*;
pub use validator::*;

#[cfg(test)]
pub(crate) use lido::test_utils;
