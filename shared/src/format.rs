//! Display formatting for amounts, dates, and weights
//!
//! The calculation core keeps exact decimals; rounding to two places happens
//! only here, at the display boundary.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount as INR with Indian digit grouping, e.g. `₹1,07,562.00`.
/// The sign comes before the currency symbol.
pub fn format_inr(amount: Decimal) -> String {
    format_inr_with_prefix(amount, "₹")
}

/// INR formatting with an ASCII-safe prefix for PDF fonts, e.g. `Rs 1,07,562.00`
pub fn format_inr_pdf_safe(amount: Decimal) -> String {
    format_inr_with_prefix(amount, "Rs ")
}

fn format_inr_with_prefix(amount: Decimal, prefix: &str) -> String {
    let negative = amount.is_sign_negative() && !amount.is_zero();
    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{rounded:.2}");
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

    let sign = if negative { "-" } else { "" };
    format!("{sign}{prefix}{}.{frac_part}", group_indian(int_part))
}

/// Indian grouping: last three digits, then groups of two (12,34,56,789)
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (mut head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    while head.len() > 2 {
        let (rest, group) = head.split_at(head.len() - 2);
        groups.push(group);
        head = rest;
    }
    groups.push(head);
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// `dd-mm-yyyy`, the format used on bills and reports
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// A weight with two decimal places and its unit, e.g. `5122.00 kg`
pub fn format_weight(kg: Decimal) -> String {
    let rounded = kg.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2} kg")
}
