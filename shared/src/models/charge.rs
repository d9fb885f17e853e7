//! Charge head models
//!
//! A charge head is a reusable, configurable charge rule (Hamali, Dalali,
//! Market Fees, ...). Heads are configuration: immutable during a single
//! totals computation and referenced, never owned, by voucher charge entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// TDS computation is disabled across all vouchers. The heads and party-level
/// rates stay configurable so re-enabling is a one-line flip here.
pub const TDS_CALCULATION_ENABLED: bool = false;

/// Whether a charge adds to or deducts from the voucher amount
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChargeKind {
    Addition,
    Deduction,
}

/// How a charge amount is derived from the voucher
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChargeCalcType {
    /// Fixed currency amount, independent of voucher size
    Flat,
    /// Rate × total net weight in kilograms
    PerKg,
    /// Rate × total net weight in quintals (100 kg)
    PerQtl,
    /// Rate × total bag count
    PerBag,
    /// Subtotal × rate / 100
    PercentOfSubtotal,
}

/// Evaluation behaviour of a charge head, beyond its generic calc type.
///
/// Resolved once from the head's display name when configuration is loaded
/// (see [`ChargeRole::from_name`]) so the evaluator never matches on display
/// text a master-data editor could rename.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ChargeRole {
    /// Plain generic dispatch on the calc type
    #[default]
    Standard,
    /// Brokerage: forced to zero for zero-dalal parties
    ZeroDalalSuppressible,
    /// Driven by the party's commission percent, not the head's own rate
    AsamiCommission,
    /// Force-zeroed while [`TDS_CALCULATION_ENABLED`] is false
    TdsDisabled,
}

impl ChargeRole {
    /// Map a head's display name to its evaluation role.
    ///
    /// "Dalali" matches case-insensitively; the other two names are exact,
    /// matching how the stock master data spells them.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("dalali") {
            ChargeRole::ZeroDalalSuppressible
        } else if name == "Asami Commission" {
            ChargeRole::AsamiCommission
        } else if name == "TDS" {
            ChargeRole::TdsDisabled
        } else {
            ChargeRole::Standard
        }
    }
}

/// A configurable charge rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeHead {
    pub id: String,
    pub name: String,
    pub kind: ChargeKind,
    pub calc_type: ChargeCalcType,
    pub rate_value: Decimal,
    /// Applied automatically to eligible voucher types
    pub is_default: bool,
    /// Missing in legacy stored data; resolve with [`resolve_roles`] on load
    #[serde(default)]
    pub role: ChargeRole,
}

impl ChargeHead {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: ChargeKind,
        calc_type: ChargeCalcType,
        rate_value: Decimal,
        is_default: bool,
    ) -> Self {
        let name = name.into();
        let role = ChargeRole::from_name(&name);
        Self {
            id: id.into(),
            name,
            kind,
            calc_type,
            rate_value,
            is_default,
            role,
        }
    }
}

/// Re-derive every head's role from its name. Call once after loading charge
/// heads from storage, before any totals computation.
pub fn resolve_roles(heads: &mut [ChargeHead]) {
    for head in heads.iter_mut() {
        head.role = ChargeRole::from_name(&head.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_stock_names() {
        assert_eq!(
            ChargeRole::from_name("Dalali"),
            ChargeRole::ZeroDalalSuppressible
        );
        assert_eq!(
            ChargeRole::from_name("DALALI"),
            ChargeRole::ZeroDalalSuppressible
        );
        assert_eq!(
            ChargeRole::from_name("Asami Commission"),
            ChargeRole::AsamiCommission
        );
        assert_eq!(ChargeRole::from_name("TDS"), ChargeRole::TdsDisabled);
    }

    #[test]
    fn test_role_defaults_to_standard() {
        assert_eq!(ChargeRole::from_name("Hamali"), ChargeRole::Standard);
        assert_eq!(ChargeRole::from_name("Market Fees"), ChargeRole::Standard);
        // Exact-match names do not fuzzy-match
        assert_eq!(ChargeRole::from_name("tds"), ChargeRole::Standard);
        assert_eq!(
            ChargeRole::from_name("asami commission"),
            ChargeRole::Standard
        );
    }

    #[test]
    fn test_resolve_roles_rewrites_stale_tags() {
        let mut heads = vec![ChargeHead {
            id: "ch_dalali".into(),
            name: "Dalali".into(),
            kind: ChargeKind::Deduction,
            calc_type: ChargeCalcType::PercentOfSubtotal,
            rate_value: Decimal::TWO,
            is_default: true,
            role: ChargeRole::Standard,
        }];
        resolve_roles(&mut heads);
        assert_eq!(heads[0].role, ChargeRole::ZeroDalalSuppressible);
    }
}
