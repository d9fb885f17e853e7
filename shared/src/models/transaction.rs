//! Voucher (transaction) models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Voucher types
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionType {
    Purchase,
    Sale,
    /// Commission-agent purchase; settled by a patti bill
    Asami,
    #[serde(rename = "Zero Dalal")]
    ZeroDalal,
    Payment,
    Cash,
}

impl TransactionType {
    /// Payment and Cash vouchers carry money only, never commodity lines.
    pub fn is_monetary_only(&self) -> bool {
        matches!(self, TransactionType::Payment | TransactionType::Cash)
    }
}

/// Direction of a payment voucher
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentType {
    Paid,
    Received,
}

/// What a cash voucher was spent on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CashPaymentPurpose {
    Salary,
    #[serde(rename = "Lorry Freight")]
    LorryFreight,
    #[serde(rename = "NSG")]
    Nsg,
    Pada,
    Other,
}

impl CashPaymentPurpose {
    pub fn label(&self) -> &'static str {
        match self {
            CashPaymentPurpose::Salary => "Salary",
            CashPaymentPurpose::LorryFreight => "Lorry Freight",
            CashPaymentPurpose::Nsg => "NSG",
            CashPaymentPurpose::Pada => "Pada",
            CashPaymentPurpose::Other => "Other",
        }
    }
}

/// Unit a line's rate is quoted in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RateUnit {
    PerKg,
    PerQuintal,
    PerBag,
}

/// One commodity line within a voucher.
///
/// `net_weight_kg` and `line_amount` are cached outputs of the calculation
/// engine, never authoritative inputs; they are overwritten on every
/// recalculation pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionLine {
    pub id: String,
    pub transaction_id: String,
    pub crop_id: String,
    pub bags: u32,
    pub unloaded_weight_kg: Decimal,
    /// Shrinkage/moisture deduction percent (0-100), ignored on sales
    pub suite_percent: Decimal,
    pub net_weight_kg: Decimal,
    pub rate_value: Decimal,
    pub rate_unit: RateUnit,
    pub line_amount: Decimal,
}

impl TransactionLine {
    /// A fresh zeroed line for the entry form; derived fields are filled by
    /// the next recalculation pass.
    pub fn draft(transaction_id: impl Into<String>, crop_id: impl Into<String>) -> Self {
        Self {
            id: format!("line_{}", Uuid::new_v4()),
            transaction_id: transaction_id.into(),
            crop_id: crop_id.into(),
            bags: 0,
            unloaded_weight_kg: Decimal::ZERO,
            suite_percent: Decimal::ZERO,
            net_weight_kg: Decimal::ZERO,
            rate_value: Decimal::ZERO,
            rate_unit: RateUnit::PerQuintal,
            line_amount: Decimal::ZERO,
        }
    }
}

/// One application of a charge head to a voucher.
///
/// `computed_amount` is a cached evaluator output, recomputed and overwritten
/// on every totals pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionCharge {
    pub id: String,
    pub transaction_id: String,
    pub charge_head_id: String,
    /// Supersedes the head's base rate for generic (non-special-cased) heads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_value_override: Option<Decimal>,
    pub computed_amount: Decimal,
}

/// A voucher: commodity lines, applied charges, and settlement amount
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub party_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker_id: Option<String>,

    /// Bill number; shown as "Patti No." for asami vouchers
    pub bill_no: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lorry_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bilty_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permit_no: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,

    pub lines: Vec<TransactionLine>,
    pub charges: Vec<TransactionCharge>,

    /// Amount already settled against this voucher (received or paid)
    pub amount_received: Decimal,

    // Payment/cash voucher fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<PaymentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_payment_purpose: Option<CashPaymentPurpose>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cash_description: Option<String>,
}

impl Transaction {
    /// Sum of cached line amounts
    pub fn subtotal(&self) -> Decimal {
        self.lines.iter().map(|l| l.line_amount).sum()
    }

    /// Sum of cached net weights across all lines, in kilograms
    pub fn total_net_weight_kg(&self) -> Decimal {
        self.lines.iter().map(|l| l.net_weight_kg).sum()
    }

    /// Sum of bag counts across all lines
    pub fn total_bags(&self) -> u32 {
        self.lines.iter().map(|l| l.bags).sum()
    }
}

/// Aggregate financial figures for one voucher
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionTotals {
    pub subtotal: Decimal,
    pub total_additions: Decimal,
    pub total_deductions: Decimal,
    /// Tracked separately for display; zero while TDS is disabled
    pub tds_amount: Decimal,
    pub grand_total: Decimal,
    /// grand_total − amount_received; negative means overpayment
    pub balance: Decimal,
}

impl TransactionTotals {
    /// Degenerate totals for monetary-only vouchers (no lines, no charges)
    pub fn zero() -> Self {
        Self {
            subtotal: Decimal::ZERO,
            total_additions: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            tds_amount: Decimal::ZERO,
            grand_total: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }
}
