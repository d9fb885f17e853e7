//! Party (counterpart) models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Party categories known to the system
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PartyType {
    Supplier,
    Customer,
    Broker,
    Employee,
    Other,
}

/// A counterpart in the trade ledger: supplier, customer, broker, etc.
///
/// The flag fields (`is_zero_dalal`, `asami_flag`, TDS fields) are read-only
/// inputs to charge evaluation; the calculation core never mutates a party.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub party_type: PartyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gstin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan: Option<String>,
    pub mobile: String,
    pub address: String,
    /// Brokerage (Dalali) is waived for this party
    pub is_zero_dalal: bool,
    pub tds_applicable: bool,
    pub tds_rate_percent: Decimal,
    /// Party trades under an asami arrangement (trader acts as commission agent)
    pub asami_flag: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asami_commission_percent: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_id: Option<String>,
}

/// Input for registering a new party
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPartyInput {
    pub name: String,
    pub party_type: PartyType,
    pub mobile: String,
    pub address: String,
    pub gstin: Option<String>,
    pub pan: Option<String>,
    pub is_zero_dalal: bool,
    pub tds_applicable: bool,
    pub tds_rate_percent: Decimal,
    pub asami_flag: bool,
    pub asami_commission_percent: Option<Decimal>,
    pub payment_terms: Option<String>,
    pub bank_account_id: Option<String>,
}
