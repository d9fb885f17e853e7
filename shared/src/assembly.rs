//! Voucher-type-driven charge set assembly
//!
//! When the voucher type or party changes in the entry form, the applied
//! charge set is rebuilt from the configured heads. Amounts are left at zero;
//! the calculation engine fills them on the next totals pass.

use rust_decimal::Decimal;

use crate::models::{ChargeHead, Transaction, TransactionCharge, TransactionType};

/// The charge heads a freshly assembled voucher of this type starts with.
///
/// - Purchase: every head flagged as default.
/// - Asami: Hamali and Dalali only (the commission itself rides on the
///   party's percent).
/// - Zero Dalal: none; Hamali/Dalali are toggled manually per voucher.
/// - Sale, Payment, Cash, and line-less drafts: none.
pub fn default_charges_for(
    transaction: &Transaction,
    charge_heads: &[ChargeHead],
) -> Vec<TransactionCharge> {
    if transaction.transaction_type.is_monetary_only()
        || transaction.transaction_type == TransactionType::Sale
        || transaction.lines.is_empty()
    {
        return Vec::new();
    }

    let relevant: Vec<&ChargeHead> = match transaction.transaction_type {
        TransactionType::Asami => charge_heads
            .iter()
            .filter(|h| h.name == "Hamali" || h.name == "Dalali")
            .collect(),
        TransactionType::ZeroDalal => Vec::new(),
        _ => charge_heads.iter().filter(|h| h.is_default).collect(),
    };

    relevant
        .into_iter()
        .map(|head| charge_for_head(transaction, head))
        .collect()
}

/// A zero-amount charge entry linking one head to one voucher
pub fn charge_for_head(transaction: &Transaction, head: &ChargeHead) -> TransactionCharge {
    TransactionCharge {
        id: format!("tc_{}_{}", head.id, transaction.id),
        transaction_id: transaction.id.clone(),
        charge_head_id: head.id.clone(),
        rate_value_override: None,
        computed_amount: Decimal::ZERO,
    }
}
