//! Party ledger derivation
//!
//! Builds a date-ordered debit/credit statement with a running balance for
//! one party, and the outstanding-balance summary shown on the dashboard.
//! Everything is derived from the vouchers on demand; nothing is stored.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::calc::compute_totals;
use crate::models::{ChargeHead, Party, PaymentType, Transaction, TransactionType};

/// One row of a party ledger statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub transaction_id: String,
    pub date: NaiveDate,
    pub bill_no: String,
    /// Human-readable voucher description (type plus payment/cash details)
    pub narrative: String,
    pub debit: Decimal,
    pub credit: Decimal,
    /// Running balance after this row
    pub balance: Decimal,
}

fn narrative_for(transaction: &Transaction) -> String {
    match transaction.transaction_type {
        TransactionType::Payment => match transaction.payment_type {
            Some(PaymentType::Paid) => "Payment (Paid)".to_string(),
            _ => "Payment (Received)".to_string(),
        },
        TransactionType::Cash => {
            let details: Vec<&str> = transaction
                .cash_payment_purpose
                .map(|p| p.label())
                .into_iter()
                .chain(
                    transaction
                        .cash_description
                        .as_deref()
                        .map(str::trim)
                        .filter(|d| !d.is_empty()),
                )
                .collect();
            if details.is_empty() {
                "Cash Payment".to_string()
            } else {
                format!("Cash Payment - {}", details.join(" – "))
            }
        }
        TransactionType::Purchase => "Purchase".to_string(),
        TransactionType::Sale => "Sale".to_string(),
        TransactionType::Asami => "Asami".to_string(),
        TransactionType::ZeroDalal => "Zero Dalal".to_string(),
    }
}

/// Debit/credit split for one voucher.
///
/// Payments paid out and cash vouchers debit the party; payments received
/// credit it. Goods vouchers debit the grand total and credit whatever was
/// settled on the spot.
fn debit_credit(
    transaction: &Transaction,
    charge_heads: &[ChargeHead],
    party: &Party,
) -> (Decimal, Decimal) {
    match transaction.transaction_type {
        TransactionType::Payment => match transaction.payment_type {
            Some(PaymentType::Paid) => (transaction.amount_received, Decimal::ZERO),
            _ => (Decimal::ZERO, transaction.amount_received),
        },
        TransactionType::Cash => (transaction.amount_received, Decimal::ZERO),
        _ => {
            let totals = compute_totals(transaction, charge_heads, Some(party));
            (totals.grand_total, transaction.amount_received)
        }
    }
}

/// Build the ledger statement for one party, optionally restricted to an
/// inclusive date range. Rows come out date-ordered with a running balance.
pub fn party_ledger(
    party: &Party,
    transactions: &[Transaction],
    charge_heads: &[ChargeHead],
    date_range: Option<(NaiveDate, NaiveDate)>,
) -> Vec<LedgerEntry> {
    let mut relevant: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| tx.party_id == party.id)
        .filter(|tx| match date_range {
            Some((start, end)) => tx.date >= start && tx.date <= end,
            None => true,
        })
        .collect();
    relevant.sort_by_key(|tx| tx.date);

    let mut balance = Decimal::ZERO;
    relevant
        .into_iter()
        .map(|tx| {
            let (debit, credit) = debit_credit(tx, charge_heads, party);
            balance += debit - credit;
            LedgerEntry {
                transaction_id: tx.id.clone(),
                date: tx.date,
                bill_no: tx.bill_no.clone(),
                narrative: narrative_for(tx),
                debit,
                credit,
                balance,
            }
        })
        .collect()
}

/// Net balance per party across all vouchers.
///
/// Goods vouchers contribute their outstanding balance; settlement-only
/// vouchers (Payment, Cash) contribute `−amount_received`, reducing what the
/// party owes.
pub fn outstanding_by_party(
    transactions: &[Transaction],
    parties: &[Party],
    charge_heads: &[ChargeHead],
) -> HashMap<String, Decimal> {
    let mut balances: HashMap<String, Decimal> = HashMap::new();
    for tx in transactions {
        let contribution = if tx.transaction_type.is_monetary_only() {
            -tx.amount_received
        } else {
            let party = parties.iter().find(|p| p.id == tx.party_id);
            compute_totals(tx, charge_heads, party).balance
        };
        *balances.entry(tx.party_id.clone()).or_default() += contribution;
    }
    balances
}

/// Dashboard figure: the sum of all positive party balances
pub fn total_outstanding(
    transactions: &[Transaction],
    parties: &[Party],
    charge_heads: &[ChargeHead],
) -> Decimal {
    outstanding_by_party(transactions, parties, charge_heads)
        .values()
        .filter(|b| **b > Decimal::ZERO)
        .sum()
}
