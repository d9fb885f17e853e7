//! Shared domain library for the Mandi Ledger grain-trading bookkeeper
//!
//! This crate contains the models and pure calculations shared between the
//! persistence layer, the report/export layer, and the browser UI (via WASM):
//! voucher weight/amount/charge/totals computation, party ledger derivation,
//! charge set assembly, stock master data, formatting, and validation.

pub mod assembly;
pub mod calc;
pub mod defaults;
pub mod format;
pub mod ledger;
pub mod models;
pub mod types;
pub mod validation;

pub use assembly::*;
pub use calc::*;
pub use defaults::*;
pub use format::*;
pub use ledger::*;
pub use models::*;
pub use types::*;
pub use validation::*;
