//! Domain models for the mandi ledger

mod bank;
mod charge;
mod crop;
mod party;
mod transaction;

pub use bank::*;
pub use charge::*;
pub use crop::*;
pub use party::*;
pub use transaction::*;
