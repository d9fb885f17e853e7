//! Validation utilities
//!
//! Single-field checks used by the master-data and voucher entry forms, plus
//! the structural voucher invariants. Validation happens at the entry
//! boundary; the calculation core itself never rejects input (it degrades to
//! zero instead, so a half-edited voucher still renders a total).

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{RegisterPartyInput, Transaction, TransactionType};

/// Structural problems with a voucher draft
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoucherError {
    #[error("{0:?} vouchers carry money only and must not have commodity lines")]
    MonetaryVoucherWithLines(TransactionType),

    #[error("{0:?} vouchers carry money only and must not have charges")]
    MonetaryVoucherWithCharges(TransactionType),

    #[error("payment voucher is missing its direction (paid/received)")]
    MissingPaymentDirection,

    #[error("voucher has no party")]
    MissingParty,

    #[error("amount received cannot be negative")]
    NegativeAmountReceived,

    #[error("line {line_id}: {reason}")]
    InvalidLine {
        line_id: String,
        reason: &'static str,
    },
}

/// Check the structural invariants of a voucher before it is stored.
pub fn validate_voucher(transaction: &Transaction) -> Result<(), VoucherError> {
    let tx_type = transaction.transaction_type;

    if tx_type.is_monetary_only() {
        if !transaction.lines.is_empty() {
            return Err(VoucherError::MonetaryVoucherWithLines(tx_type));
        }
        if !transaction.charges.is_empty() {
            return Err(VoucherError::MonetaryVoucherWithCharges(tx_type));
        }
        if tx_type == TransactionType::Payment && transaction.payment_type.is_none() {
            return Err(VoucherError::MissingPaymentDirection);
        }
    }

    if transaction.party_id.trim().is_empty() {
        return Err(VoucherError::MissingParty);
    }

    if transaction.amount_received < Decimal::ZERO {
        return Err(VoucherError::NegativeAmountReceived);
    }

    for line in &transaction.lines {
        let invalid = |reason| {
            Err(VoucherError::InvalidLine {
                line_id: line.id.clone(),
                reason,
            })
        };
        if line.unloaded_weight_kg < Decimal::ZERO {
            return invalid("unloaded weight cannot be negative");
        }
        if validate_suite_percent(line.suite_percent).is_err() {
            return invalid("suite percent must be between 0 and 100");
        }
        if line.crop_id.trim().is_empty() {
            return invalid("line has no crop");
        }
    }

    Ok(())
}

/// Check a party registration form before the record is created.
pub fn validate_party_input(input: &RegisterPartyInput) -> Result<(), &'static str> {
    if input.name.trim().is_empty() {
        return Err("Party name is required");
    }
    validate_mobile(&input.mobile)?;
    if let Some(gstin) = &input.gstin {
        validate_gstin(gstin)?;
    }
    if let Some(pan) = &input.pan {
        validate_pan(pan)?;
    }
    if input.tds_rate_percent < Decimal::ZERO || input.tds_rate_percent > Decimal::ONE_HUNDRED {
        return Err("TDS rate must be between 0 and 100");
    }
    match (input.asami_flag, input.asami_commission_percent) {
        (true, None) => return Err("Asami parties need a commission percent"),
        (_, Some(pct)) if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED => {
            return Err("Asami commission must be between 0 and 100")
        }
        _ => {}
    }
    Ok(())
}

/// Suite (shrinkage) percent is a deduction-only percentage
pub fn validate_suite_percent(percent: Decimal) -> Result<(), &'static str> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err("Suite percent must be between 0 and 100");
    }
    Ok(())
}

/// Validate an Indian mobile number.
/// Accepts: 9876543210, 98765-43210, +919876543210
pub fn validate_mobile(mobile: &str) -> Result<(), &'static str> {
    let digits: String = mobile.chars().filter(|c| c.is_ascii_digit()).collect();

    // 10 digits starting 6-9
    if digits.len() == 10 && digits.starts_with(['6', '7', '8', '9']) {
        return Ok(());
    }
    // With the 91 country code
    if digits.len() == 12 && digits.starts_with("91") && digits[2..].starts_with(['6', '7', '8', '9'])
    {
        return Ok(());
    }
    Err("Invalid Indian mobile number")
}

/// Validate a PAN (5 letters, 4 digits, 1 letter, all uppercase)
pub fn validate_pan(pan: &str) -> Result<(), &'static str> {
    let chars: Vec<char> = pan.chars().collect();
    if chars.len() != 10 {
        return Err("PAN must be 10 characters");
    }
    let ok = chars[..5].iter().all(|c| c.is_ascii_uppercase())
        && chars[5..9].iter().all(|c| c.is_ascii_digit())
        && chars[9].is_ascii_uppercase();
    if ok {
        Ok(())
    } else {
        Err("Invalid PAN format")
    }
}

/// Validate a GSTIN (2-digit state code, 10-character PAN, entity code,
/// the literal 'Z', check character)
pub fn validate_gstin(gstin: &str) -> Result<(), &'static str> {
    let chars: Vec<char> = gstin.chars().collect();
    if chars.len() != 15 {
        return Err("GSTIN must be 15 characters");
    }
    if !chars[..2].iter().all(|c| c.is_ascii_digit()) {
        return Err("GSTIN must start with a 2-digit state code");
    }
    let pan: String = chars[2..12].iter().collect();
    if validate_pan(&pan).is_err() {
        return Err("GSTIN characters 3-12 must be a valid PAN");
    }
    if !chars[12].is_ascii_alphanumeric() || chars[13] != 'Z' || !chars[14].is_ascii_alphanumeric()
    {
        return Err("Invalid GSTIN suffix");
    }
    Ok(())
}

/// Validate an IFSC code (4 letters, '0', 6 alphanumerics)
pub fn validate_ifsc(ifsc: &str) -> Result<(), &'static str> {
    let chars: Vec<char> = ifsc.chars().collect();
    if chars.len() != 11 {
        return Err("IFSC must be 11 characters");
    }
    let ok = chars[..4].iter().all(|c| c.is_ascii_uppercase())
        && chars[4] == '0'
        && chars[5..].iter().all(|c| c.is_ascii_alphanumeric());
    if ok {
        Ok(())
    } else {
        Err("Invalid IFSC format")
    }
}

/// Validate an HSN commodity code (4, 6 or 8 digits)
pub fn validate_hsn(hsn: &str) -> Result<(), &'static str> {
    if !matches!(hsn.len(), 4 | 6 | 8) {
        return Err("HSN code must be 4, 6 or 8 digits");
    }
    if !hsn.chars().all(|c| c.is_ascii_digit()) {
        return Err("HSN code must be numeric");
    }
    Ok(())
}
