use anchor_lang::prelude::*;

#[cfg(feature = "local-testing")]
declare_id!("6Lvkd2Kh6wm3PQar8ej1BLr1KNe8M1ui7xDmhy84t4CU");

#[cfg(not(feature = "local-testing"))]
declare_id!("CrX7kMhLC3cSsXJdT7JDgqrRVWGnUpX3gfEfxxU2NVLi");

pub mod account_map;
pub mod checks;
pub mod consts;
pub mod errors;
pub mod layout;
pub mod pda;
pub mod rational;
pub mod state;

pub use checks::*;
pub use pda::*;
pub use state::*;
