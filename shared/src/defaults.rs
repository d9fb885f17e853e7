//! Stock master data seeded on first run
//!
//! Ids are stable keys (`ch_hamali`, `crop_maize`, ...) so voucher references
//! survive renames of the display text.

use rust_decimal::Decimal;

use crate::models::{BankAccount, ChargeCalcType, ChargeHead, ChargeKind, Crop};
use crate::types::DEFAULT_TDS_RATE_PERCENT;

/// The nine stock charge heads, with evaluation roles already resolved
pub fn default_charge_heads() -> Vec<ChargeHead> {
    use ChargeCalcType::*;
    use ChargeKind::*;

    vec![
        ChargeHead::new("ch_hamali", "Hamali", Deduction, PerBag, Decimal::from(4), true),
        ChargeHead::new("ch_dalali", "Dalali", Deduction, PercentOfSubtotal, Decimal::TWO, true),
        ChargeHead::new(
            "ch_market_fees",
            "Market Fees",
            Deduction,
            PercentOfSubtotal,
            Decimal::new(6, 1),
            true,
        ),
        ChargeHead::new(
            "ch_chintal_fees",
            "Chintal Fees",
            Deduction,
            PerBag,
            Decimal::new(3, 1),
            true,
        ),
        ChargeHead::new(
            "ch_tds",
            "TDS",
            Deduction,
            PercentOfSubtotal,
            DEFAULT_TDS_RATE_PERCENT,
            false,
        ),
        ChargeHead::new(
            "ch_asami_commission",
            "Asami Commission",
            Deduction,
            PercentOfSubtotal,
            Decimal::ONE,
            false,
        ),
        ChargeHead::new("ch_gunny_bag", "Gunny Bag", Addition, Flat, Decimal::from(20), false),
        ChargeHead::new("ch_insurance", "Insurance", Deduction, Flat, Decimal::from(100), false),
        ChargeHead::new(
            "ch_ledger_maintenance",
            "Ledger Maintenance",
            Deduction,
            Flat,
            Decimal::from(50),
            false,
        ),
    ]
}

/// Stock crops
pub fn default_crops() -> Vec<Crop> {
    vec![
        Crop {
            id: "crop_maize".into(),
            name: "Maize".into(),
            grade: Some("A".into()),
            default_bag_weight_kg: Decimal::new(550, 3),
            hsn_code: Some("10059000".into()),
        },
        Crop {
            id: "crop_wheat".into(),
            name: "Wheat".into(),
            grade: Some("Standard".into()),
            default_bag_weight_kg: Decimal::new(500, 3),
            hsn_code: Some("10019910".into()),
        },
        Crop {
            id: "crop_bajra".into(),
            name: "Bajra".into(),
            grade: None,
            default_bag_weight_kg: Decimal::new(500, 3),
            hsn_code: Some("10089000".into()),
        },
    ]
}

/// Stock bank accounts
pub fn default_bank_accounts() -> Vec<BankAccount> {
    vec![
        BankAccount {
            id: "bank_sbi_1".into(),
            bank_name: "State Bank of India".into(),
            branch: "Main Branch".into(),
            ifsc: "SBIN0000001".into(),
            account_no: "12345678901".into(),
            upi_id: None,
        },
        BankAccount {
            id: "bank_icici_165".into(),
            bank_name: "ICICI 165".into(),
            branch: "Branch A".into(),
            ifsc: "ICIC0000165".into(),
            account_no: "00012345678".into(),
            upi_id: None,
        },
        BankAccount {
            id: "bank_icici_199".into(),
            bank_name: "ICICI 199".into(),
            branch: "Branch B".into(),
            ifsc: "ICIC0000199".into(),
            account_no: "00098765432".into(),
            upi_id: None,
        },
        BankAccount {
            id: "bank_suco_1".into(),
            bank_name: "SUCO".into(),
            branch: "Main Branch".into(),
            ifsc: "SUCO0000001".into(),
            account_no: "11122233344".into(),
            upi_id: None,
        },
    ]
}
