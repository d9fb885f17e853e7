//! WebAssembly module for the Mandi Ledger bookkeeper
//!
//! Provides client-side computation for:
//! - Voucher totals (subtotal, charges, grand total, balance)
//! - Line net weight and amount
//! - Party ledger statements
//! - INR display formatting
//!
//! The workers below return plain `String` errors; conversion to `JsValue`
//! happens only inside the `#[wasm_bindgen]` exports, which keeps every
//! computation path runnable off-wasm.

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn parse<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {what} JSON: {e}"))
}

fn parse_party(party_json: &str) -> Result<Option<Party>, String> {
    if party_json.trim().is_empty() || party_json.trim() == "null" {
        return Ok(None);
    }
    parse::<Party>(party_json, "party").map(Some)
}

fn parse_heads(charge_heads_json: &str) -> Result<Vec<ChargeHead>, String> {
    let mut heads: Vec<ChargeHead> = parse(charge_heads_json, "charge heads")?;
    shared::models::resolve_roles(&mut heads);
    Ok(heads)
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn js_err(message: String) -> JsValue {
    JsValue::from_str(&message)
}

fn transaction_totals_json(
    transaction_json: &str,
    charge_heads_json: &str,
    party_json: &str,
) -> Result<String, String> {
    let transaction: Transaction = parse(transaction_json, "transaction")?;
    let heads = parse_heads(charge_heads_json)?;
    let party = parse_party(party_json)?;

    let totals = shared::calc::compute_totals(&transaction, &heads, party.as_ref());
    to_json(&totals)
}

/// Compute a voucher's aggregate totals. `party_json` may be empty or "null"
/// when no party is selected yet. Returns the totals as JSON.
#[wasm_bindgen]
pub fn compute_transaction_totals(
    transaction_json: &str,
    charge_heads_json: &str,
    party_json: &str,
) -> Result<String, JsValue> {
    transaction_totals_json(transaction_json, charge_heads_json, party_json).map_err(js_err)
}

fn refresh_voucher_json(
    transaction_json: &str,
    charge_heads_json: &str,
    party_json: &str,
) -> Result<String, String> {
    let mut transaction: Transaction = parse(transaction_json, "transaction")?;
    let heads = parse_heads(charge_heads_json)?;
    let party = parse_party(party_json)?;

    let totals = shared::calc::refresh_voucher(&mut transaction, &heads, party.as_ref());
    to_json(&serde_json::json!({ "transaction": transaction, "totals": totals }))
}

/// Recompute a voucher draft in full (line caches, charge amounts, totals)
/// and return the updated voucher plus totals as JSON:
/// `{"transaction": ..., "totals": ...}`.
#[wasm_bindgen]
pub fn refresh_voucher_draft(
    transaction_json: &str,
    charge_heads_json: &str,
    party_json: &str,
) -> Result<String, JsValue> {
    refresh_voucher_json(transaction_json, charge_heads_json, party_json).map_err(js_err)
}

/// Net weight in kilograms for one line's raw quantities
#[wasm_bindgen]
pub fn compute_net_weight(unloaded_weight_kg: f64, suite_percent: f64, is_sale: bool) -> f64 {
    let unloaded = Decimal::try_from(unloaded_weight_kg).unwrap_or(Decimal::ZERO);
    if is_sale {
        return unloaded_weight_kg;
    }
    let suite = Decimal::try_from(suite_percent).unwrap_or(Decimal::ZERO);
    let net = (unloaded * (Decimal::ONE_HUNDRED - suite) / Decimal::ONE_HUNDRED)
        .max(Decimal::ZERO);
    net.to_string().parse().unwrap_or(0.0)
}

fn line_amount_value(line_json: &str) -> Result<f64, String> {
    let line: TransactionLine = parse(line_json, "line")?;
    let amount = shared::calc::line_amount(&line);
    Ok(amount.to_string().parse().unwrap_or(0.0))
}

/// Monetary amount of one line (JSON-encoded `TransactionLine`)
#[wasm_bindgen]
pub fn compute_line_amount(line_json: &str) -> Result<f64, JsValue> {
    line_amount_value(line_json).map_err(js_err)
}

fn party_ledger_json(
    party_json: &str,
    transactions_json: &str,
    charge_heads_json: &str,
    start_date: &str,
    end_date: &str,
) -> Result<String, String> {
    let party: Party = parse(party_json, "party")?;
    let transactions: Vec<Transaction> = parse(transactions_json, "transactions")?;
    let heads = parse_heads(charge_heads_json)?;

    let range = if start_date.is_empty() || end_date.is_empty() {
        None
    } else {
        let start = start_date
            .parse()
            .map_err(|_| "Invalid start date".to_string())?;
        let end = end_date
            .parse()
            .map_err(|_| "Invalid end date".to_string())?;
        Some((start, end))
    };

    let rows: Vec<serde_json::Value> =
        shared::ledger::party_ledger(&party, &transactions, &heads, range)
            .into_iter()
            .map(|e| {
                serde_json::json!({
                    "transaction_id": e.transaction_id,
                    "date": e.date,
                    "bill_no": e.bill_no,
                    "narrative": e.narrative,
                    "debit": e.debit,
                    "credit": e.credit,
                    "balance": e.balance,
                })
            })
            .collect();
    to_json(&rows)
}

/// Build a party's ledger statement. Date bounds are `YYYY-MM-DD` strings;
/// pass empty strings to skip the range filter. Returns rows as JSON.
#[wasm_bindgen]
pub fn compute_party_ledger(
    party_json: &str,
    transactions_json: &str,
    charge_heads_json: &str,
    start_date: &str,
    end_date: &str,
) -> Result<String, JsValue> {
    party_ledger_json(
        party_json,
        transactions_json,
        charge_heads_json,
        start_date,
        end_date,
    )
    .map_err(js_err)
}

/// The stock charge heads, roles resolved, as JSON
#[wasm_bindgen]
pub fn default_charge_heads_json() -> String {
    serde_json::to_string(&shared::defaults::default_charge_heads()).unwrap_or_default()
}

/// Format an amount for display, e.g. `₹1,07,562.00`
#[wasm_bindgen]
pub fn format_inr_display(amount: f64) -> String {
    let amount = Decimal::try_from(amount).unwrap_or(Decimal::ZERO);
    shared::format::format_inr(amount)
}

/// ASCII-safe INR formatting for PDF export, e.g. `Rs 1,07,562.00`
#[wasm_bindgen]
pub fn format_inr_pdf(amount: f64) -> String {
    let amount = Decimal::try_from(amount).unwrap_or(Decimal::ZERO);
    shared::format::format_inr_pdf_safe(amount)
}
