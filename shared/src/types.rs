//! Common constants and small types

use rust_decimal::Decimal;

/// A quintal is fixed at 100 kg in this domain.
pub const QUINTAL_IN_KG: Decimal = Decimal::ONE_HUNDRED;

/// Default TDS rate percent used when seeding the TDS charge head.
/// TDS evaluation itself is disabled; see `models::TDS_CALCULATION_ENABLED`.
pub const DEFAULT_TDS_RATE_PERCENT: Decimal = Decimal::ONE;
