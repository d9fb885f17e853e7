//! The voucher calculation engine.
//!
//! Three layers, leaf-first: per-line weight/amount computation, charge
//! evaluation, and totals aggregation. Everything here is a pure function
//! over in-memory values — exact `Decimal` arithmetic, no rounding, no I/O,
//! and no failure paths. Malformed inputs (negative rates, unresolved charge
//! head ids) degrade to zero or are skipped so a half-edited voucher always
//! renders some total.

use rust_decimal::Decimal;

use crate::models::{
    ChargeCalcType, ChargeHead, ChargeKind, ChargeRole, Party, RateUnit, Transaction,
    TransactionCharge, TransactionLine, TransactionTotals, TransactionType,
    TDS_CALCULATION_ENABLED,
};
use crate::types::QUINTAL_IN_KG;

/// Net weight of a line in kilograms.
///
/// Sales carry the unloaded weight unchanged; every other voucher type
/// deducts the suite (shrinkage) percent, floored at zero.
pub fn net_weight(line: &TransactionLine, transaction_type: TransactionType) -> Decimal {
    if transaction_type == TransactionType::Sale {
        return line.unloaded_weight_kg;
    }

    let suite_deduction = line.unloaded_weight_kg * line.suite_percent / Decimal::ONE_HUNDRED;
    let net = line.unloaded_weight_kg - suite_deduction;

    net.max(Decimal::ZERO)
}

/// Monetary amount of a line from its cached net weight and quoted rate.
///
/// A zero or negative rate yields zero for every rate unit.
pub fn line_amount(line: &TransactionLine) -> Decimal {
    if line.rate_value <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    match line.rate_unit {
        RateUnit::PerKg => line.net_weight_kg * line.rate_value,
        RateUnit::PerQuintal => (line.net_weight_kg / QUINTAL_IN_KG) * line.rate_value,
        RateUnit::PerBag => Decimal::from(line.bags) * line.rate_value,
    }
}

/// Refresh a line's cached derived fields (`net_weight_kg`, `line_amount`).
/// Called on every field edit so the cached values are always recomputable
/// throwaways, never authoritative inputs.
pub fn recalculate_line(line: &mut TransactionLine, transaction_type: TransactionType) {
    line.net_weight_kg = net_weight(line, transaction_type);
    line.line_amount = line_amount(line);
}

/// One charge entry's evaluated amount, keyed by the entry's id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluatedCharge {
    pub charge_id: String,
    pub computed_amount: Decimal,
}

/// Evaluate every charge entry on a voucher.
///
/// Pure: inputs are untouched and the amounts come back as
/// `{charge_id, computed_amount}` pairs. Entries whose head id does not
/// resolve against `charge_heads` are skipped (logged, not failed) so a
/// stale reference leaves a zero-value gap rather than breaking entry.
pub fn evaluate_charges(
    transaction: &Transaction,
    charge_heads: &[ChargeHead],
    party: Option<&Party>,
) -> Vec<EvaluatedCharge> {
    // Charges never feed back into the subtotal, so it is fixed up front.
    let subtotal = transaction.subtotal();

    transaction
        .charges
        .iter()
        .filter_map(|charge| {
            let Some(head) = charge_heads.iter().find(|h| h.id == charge.charge_head_id) else {
                tracing::warn!(
                    charge_id = %charge.id,
                    charge_head_id = %charge.charge_head_id,
                    "charge head not found; skipping charge entry"
                );
                return None;
            };
            Some(EvaluatedCharge {
                charge_id: charge.id.clone(),
                computed_amount: charge_amount(charge, head, transaction, subtotal, party),
            })
        })
        .collect()
}

/// Amount of a single charge. Role-specific rules apply before the generic
/// calc-type dispatch; first match wins.
fn charge_amount(
    charge: &TransactionCharge,
    head: &ChargeHead,
    transaction: &Transaction,
    subtotal: Decimal,
    party: Option<&Party>,
) -> Decimal {
    match head.role {
        // Brokerage is waived outright for zero-dalal parties, override or not.
        ChargeRole::ZeroDalalSuppressible if party.is_some_and(|p| p.is_zero_dalal) => {
            return Decimal::ZERO;
        }
        // Asami commission comes from the party's percent, not the head's rate.
        ChargeRole::AsamiCommission => {
            return match party {
                Some(p) if p.asami_flag => p
                    .asami_commission_percent
                    .map(|pct| subtotal * pct / Decimal::ONE_HUNDRED)
                    .unwrap_or(Decimal::ZERO),
                _ => Decimal::ZERO,
            };
        }
        ChargeRole::TdsDisabled if !TDS_CALCULATION_ENABLED => return Decimal::ZERO,
        _ => {}
    }

    let rate = charge.rate_value_override.unwrap_or(head.rate_value);
    match head.calc_type {
        ChargeCalcType::Flat => rate,
        ChargeCalcType::PerKg => transaction.total_net_weight_kg() * rate,
        ChargeCalcType::PerQtl => (transaction.total_net_weight_kg() / QUINTAL_IN_KG) * rate,
        ChargeCalcType::PerBag => Decimal::from(transaction.total_bags()) * rate,
        ChargeCalcType::PercentOfSubtotal => subtotal * rate / Decimal::ONE_HUNDRED,
    }
}

/// Write evaluated amounts back onto the voucher's cached `computed_amount`
/// fields. The entry point for callers that persist the voucher afterwards.
pub fn apply_charge_amounts(transaction: &mut Transaction, evaluated: &[EvaluatedCharge]) {
    for charge in transaction.charges.iter_mut() {
        if let Some(e) = evaluated.iter().find(|e| e.charge_id == charge.id) {
            charge.computed_amount = e.computed_amount;
        }
    }
}

/// Aggregate financial totals for a voucher.
///
/// Monetary-only vouchers (Payment, Cash) have no lines or charges and come
/// back as the all-zero totals object. For everything else: subtotal, charge
/// sums by kind, the purchase sign convention, and the outstanding balance.
pub fn compute_totals(
    transaction: &Transaction,
    charge_heads: &[ChargeHead],
    party: Option<&Party>,
) -> TransactionTotals {
    if transaction.transaction_type.is_monetary_only() {
        return TransactionTotals::zero();
    }

    let subtotal = transaction.subtotal();
    let evaluated = evaluate_charges(transaction, charge_heads, party);

    let mut total_additions = Decimal::ZERO;
    let mut total_deductions = Decimal::ZERO;
    let mut tds_amount = Decimal::ZERO;

    for charge in &transaction.charges {
        let Some(head) = charge_heads.iter().find(|h| h.id == charge.charge_head_id) else {
            continue;
        };
        let Some(e) = evaluated.iter().find(|e| e.charge_id == charge.id) else {
            continue;
        };
        match head.kind {
            ChargeKind::Addition => total_additions += e.computed_amount,
            ChargeKind::Deduction => total_deductions += e.computed_amount,
        }
        if head.role == ChargeRole::TdsDisabled {
            tds_amount = e.computed_amount;
        }
    }

    // For a purchase the deductions are costs borne by the buyer, deducted
    // from the seller's payout elsewhere, so they increase what this voucher
    // owes; every other line-bearing type subtracts them.
    let grand_total = if transaction.transaction_type == TransactionType::Purchase {
        subtotal + total_additions + total_deductions
    } else {
        subtotal + total_additions - total_deductions
    };

    let balance = grand_total - transaction.amount_received;

    TransactionTotals {
        subtotal,
        total_additions,
        total_deductions,
        tds_amount,
        grand_total,
        balance,
    }
}

/// Full recompute of a voucher draft: refresh every line's cached fields,
/// re-evaluate charges in place, and return the aggregate totals. Invoked by
/// the entry form while editing and once more before the voucher is stored.
pub fn refresh_voucher(
    transaction: &mut Transaction,
    charge_heads: &[ChargeHead],
    party: Option<&Party>,
) -> TransactionTotals {
    let transaction_type = transaction.transaction_type;
    for line in transaction.lines.iter_mut() {
        recalculate_line(line, transaction_type);
    }
    let evaluated = evaluate_charges(transaction, charge_heads, party);
    apply_charge_amounts(transaction, &evaluated);
    compute_totals(transaction, charge_heads, party)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChargeCalcType as Calc;
    use crate::models::ChargeKind as Kind;
    use crate::models::PartyType;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn line(bags: u32, unloaded: &str, suite: &str, rate: &str, unit: RateUnit) -> TransactionLine {
        TransactionLine {
            id: "line_1".into(),
            transaction_id: "txn_1".into(),
            crop_id: "crop_maize".into(),
            bags,
            unloaded_weight_kg: dec(unloaded),
            suite_percent: dec(suite),
            net_weight_kg: Decimal::ZERO,
            rate_value: dec(rate),
            rate_unit: unit,
            line_amount: Decimal::ZERO,
        }
    }

    fn head(id: &str, name: &str, kind: Kind, calc_type: Calc, rate: &str) -> ChargeHead {
        ChargeHead::new(id, name, kind, calc_type, dec(rate), true)
    }

    fn charge(id: &str, head_id: &str) -> TransactionCharge {
        TransactionCharge {
            id: id.into(),
            transaction_id: "txn_1".into(),
            charge_head_id: head_id.into(),
            rate_value_override: None,
            computed_amount: Decimal::ZERO,
        }
    }

    fn voucher(
        transaction_type: TransactionType,
        lines: Vec<TransactionLine>,
        charges: Vec<TransactionCharge>,
    ) -> Transaction {
        Transaction {
            id: "txn_1".into(),
            date: NaiveDate::from_ymd_opt(2024, 4, 12).unwrap(),
            transaction_type,
            party_id: "party_1".into(),
            broker_id: None,
            bill_no: "B-001".into(),
            po_no: None,
            lorry_no: None,
            bilty_no: None,
            permit_no: None,
            payment_terms: None,
            destination: None,
            remarks: None,
            lines,
            charges,
            amount_received: Decimal::ZERO,
            payment_type: None,
            bank_account_id: None,
            cash_payment_purpose: None,
            cash_description: None,
        }
    }

    fn party(is_zero_dalal: bool, asami_pct: Option<&str>) -> Party {
        Party {
            id: "party_1".into(),
            name: "Kisan Agro".into(),
            party_type: PartyType::Supplier,
            gstin: None,
            pan: None,
            mobile: "9876543210".into(),
            address: "456 Farm Lane".into(),
            is_zero_dalal,
            tds_applicable: false,
            tds_rate_percent: Decimal::ONE,
            asami_flag: asami_pct.is_some(),
            asami_commission_percent: asami_pct.map(dec),
            payment_terms: None,
            bank_account_id: None,
        }
    }

    // ------------------------------------------------------------------
    // Weight / amount calculator
    // ------------------------------------------------------------------

    #[test]
    fn test_net_weight_deducts_suite_on_purchase() {
        let l = line(50, "5200", "1.5", "2100", RateUnit::PerQuintal);
        assert_eq!(net_weight(&l, TransactionType::Purchase), dec("5122"));
    }

    #[test]
    fn test_net_weight_sale_ignores_suite() {
        let l = line(50, "5200", "1.5", "2100", RateUnit::PerQuintal);
        assert_eq!(net_weight(&l, TransactionType::Sale), dec("5200"));
    }

    #[test]
    fn test_net_weight_floors_at_zero() {
        // Suite over 100% would go negative without the clamp
        let l = line(10, "1000", "150", "0", RateUnit::PerKg);
        assert_eq!(net_weight(&l, TransactionType::Purchase), Decimal::ZERO);
    }

    #[test]
    fn test_net_weight_asami_and_zero_dalal_deduct_suite() {
        let l = line(10, "1000", "10", "0", RateUnit::PerKg);
        assert_eq!(net_weight(&l, TransactionType::Asami), dec("900"));
        assert_eq!(net_weight(&l, TransactionType::ZeroDalal), dec("900"));
    }

    #[test]
    fn test_line_amount_zero_for_nonpositive_rate() {
        for rate in ["0", "-5"] {
            for unit in [RateUnit::PerKg, RateUnit::PerQuintal, RateUnit::PerBag] {
                let mut l = line(10, "1000", "0", rate, unit);
                l.net_weight_kg = dec("1000");
                assert_eq!(line_amount(&l), Decimal::ZERO);
            }
        }
    }

    #[test]
    fn test_line_amount_per_quintal() {
        let mut l = line(50, "5200", "1.5", "2100", RateUnit::PerQuintal);
        l.net_weight_kg = dec("5122");
        assert_eq!(line_amount(&l), dec("107562"));
    }

    #[test]
    fn test_line_amount_per_kg() {
        let mut l = line(50, "5200", "1.5", "21.5", RateUnit::PerKg);
        l.net_weight_kg = dec("5122");
        assert_eq!(line_amount(&l), dec("110123.0"));
    }

    #[test]
    fn test_line_amount_per_bag_ignores_weight() {
        let mut l = line(50, "5200", "1.5", "950", RateUnit::PerBag);
        l.net_weight_kg = dec("5122");
        assert_eq!(line_amount(&l), dec("47500"));
    }

    #[test]
    fn test_recalculate_line_refreshes_cached_fields() {
        let mut l = line(50, "5200", "1.5", "2100", RateUnit::PerQuintal);
        l.net_weight_kg = dec("999");
        l.line_amount = dec("999");
        recalculate_line(&mut l, TransactionType::Purchase);
        assert_eq!(l.net_weight_kg, dec("5122"));
        assert_eq!(l.line_amount, dec("107562"));
    }

    // ------------------------------------------------------------------
    // Charge evaluator
    // ------------------------------------------------------------------

    fn priced_line(amount: &str) -> TransactionLine {
        let mut l = line(50, "5200", "1.5", "2100", RateUnit::PerQuintal);
        l.net_weight_kg = dec("5122");
        l.line_amount = dec(amount);
        l
    }

    #[test]
    fn test_zero_dalal_suppresses_dalali_even_with_override() {
        let heads = vec![head("ch_dalali", "Dalali", Kind::Deduction, Calc::PercentOfSubtotal, "2")];
        let mut c = charge("tc_1", "ch_dalali");
        c.rate_value_override = Some(dec("5"));
        let tx = voucher(TransactionType::Purchase, vec![priced_line("107562")], vec![c]);
        let p = party(true, None);

        let evaluated = evaluate_charges(&tx, &heads, Some(&p));
        assert_eq!(evaluated.len(), 1);
        assert_eq!(evaluated[0].computed_amount, Decimal::ZERO);
    }

    #[test]
    fn test_dalali_computes_normally_for_regular_party() {
        let heads = vec![head("ch_dalali", "Dalali", Kind::Deduction, Calc::PercentOfSubtotal, "2")];
        let tx = voucher(
            TransactionType::Purchase,
            vec![priced_line("107562")],
            vec![charge("tc_1", "ch_dalali")],
        );
        let p = party(false, None);

        let evaluated = evaluate_charges(&tx, &heads, Some(&p));
        assert_eq!(evaluated[0].computed_amount, dec("2151.24"));
    }

    #[test]
    fn test_asami_commission_uses_party_percent_exactly() {
        let heads = vec![head(
            "ch_asami",
            "Asami Commission",
            Kind::Deduction,
            Calc::PercentOfSubtotal,
            "1",
        )];
        let tx = voucher(
            TransactionType::Asami,
            vec![priced_line("70851.125")],
            vec![charge("tc_1", "ch_asami")],
        );
        let p = party(false, Some("1.5"));

        let evaluated = evaluate_charges(&tx, &heads, Some(&p));
        // Exact, no rounding inside the core
        assert_eq!(evaluated[0].computed_amount, dec("1062.766875"));
    }

    #[test]
    fn test_asami_commission_zero_without_flag_or_percent() {
        let heads = vec![head(
            "ch_asami",
            "Asami Commission",
            Kind::Deduction,
            Calc::PercentOfSubtotal,
            "1",
        )];
        let tx = voucher(
            TransactionType::Asami,
            vec![priced_line("70851.125")],
            vec![charge("tc_1", "ch_asami")],
        );

        // No party at all
        let evaluated = evaluate_charges(&tx, &heads, None);
        assert_eq!(evaluated[0].computed_amount, Decimal::ZERO);

        // Party without the asami flag
        let evaluated = evaluate_charges(&tx, &heads, Some(&party(false, None)));
        assert_eq!(evaluated[0].computed_amount, Decimal::ZERO);

        // Flag set but no percent configured
        let mut p = party(false, None);
        p.asami_flag = true;
        let evaluated = evaluate_charges(&tx, &heads, Some(&p));
        assert_eq!(evaluated[0].computed_amount, Decimal::ZERO);
    }

    #[test]
    fn test_tds_forced_to_zero_despite_configured_rate() {
        let heads = vec![head("ch_tds", "TDS", Kind::Deduction, Calc::PercentOfSubtotal, "5")];
        let mut c = charge("tc_1", "ch_tds");
        c.rate_value_override = Some(dec("10"));
        let tx = voucher(TransactionType::Purchase, vec![priced_line("107562")], vec![c]);

        let evaluated = evaluate_charges(&tx, &heads, Some(&party(false, None)));
        assert_eq!(evaluated[0].computed_amount, Decimal::ZERO);
    }

    #[test]
    fn test_generic_dispatch_per_calc_type() {
        let tx_lines = vec![priced_line("107562")];
        let cases = [
            (Calc::Flat, "20", "20"),
            (Calc::PerKg, "0.5", "2561.0"),   // 5122 kg × 0.5
            (Calc::PerQtl, "10", "512.20"),   // 51.22 qtl × 10
            (Calc::PerBag, "4", "200"),       // 50 bags × 4
            (Calc::PercentOfSubtotal, "0.6", "645.372"),
        ];
        for (calc_type, rate, expected) in cases {
            let heads = vec![head("ch_x", "Misc", Kind::Deduction, calc_type, rate)];
            let tx = voucher(
                TransactionType::Purchase,
                tx_lines.clone(),
                vec![charge("tc_1", "ch_x")],
            );
            let evaluated = evaluate_charges(&tx, &heads, None);
            assert_eq!(evaluated[0].computed_amount, dec(expected), "{calc_type:?}");
        }
    }

    #[test]
    fn test_override_supersedes_base_rate() {
        let heads = vec![head("ch_hamali", "Hamali", Kind::Deduction, Calc::PerBag, "4")];
        let mut c = charge("tc_1", "ch_hamali");
        c.rate_value_override = Some(dec("6"));
        let tx = voucher(TransactionType::Purchase, vec![priced_line("107562")], vec![c]);

        let evaluated = evaluate_charges(&tx, &heads, None);
        assert_eq!(evaluated[0].computed_amount, dec("300"));
    }

    #[test]
    fn test_unresolved_head_is_skipped() {
        let heads = vec![head("ch_hamali", "Hamali", Kind::Deduction, Calc::PerBag, "4")];
        let tx = voucher(
            TransactionType::Purchase,
            vec![priced_line("107562")],
            vec![charge("tc_1", "ch_hamali"), charge("tc_2", "ch_gone")],
        );

        let evaluated = evaluate_charges(&tx, &heads, None);
        assert_eq!(evaluated.len(), 1);
        assert_eq!(evaluated[0].charge_id, "tc_1");
    }

    #[test]
    fn test_apply_charge_amounts_overwrites_cached_values() {
        let heads = vec![head("ch_hamali", "Hamali", Kind::Deduction, Calc::PerBag, "4")];
        let mut tx = voucher(
            TransactionType::Purchase,
            vec![priced_line("107562")],
            vec![charge("tc_1", "ch_hamali")],
        );
        tx.charges[0].computed_amount = dec("999");

        let evaluated = evaluate_charges(&tx, &heads, None);
        apply_charge_amounts(&mut tx, &evaluated);
        assert_eq!(tx.charges[0].computed_amount, dec("200"));
    }

    // ------------------------------------------------------------------
    // Totals aggregator
    // ------------------------------------------------------------------

    fn deduction_heads() -> Vec<ChargeHead> {
        vec![
            head("ch_hamali", "Hamali", Kind::Deduction, Calc::PerBag, "4"),
            head("ch_gunny", "Gunny Bag", Kind::Addition, Calc::Flat, "20"),
        ]
    }

    #[test]
    fn test_purchase_adds_deductions_to_grand_total() {
        let mut tx = voucher(
            TransactionType::Purchase,
            vec![priced_line("107562")],
            vec![charge("tc_1", "ch_hamali"), charge("tc_2", "ch_gunny")],
        );
        tx.amount_received = dec("50000");

        let totals = compute_totals(&tx, &deduction_heads(), None);
        assert_eq!(totals.subtotal, dec("107562"));
        assert_eq!(totals.total_additions, dec("20"));
        assert_eq!(totals.total_deductions, dec("200"));
        assert_eq!(totals.grand_total, dec("107782"));
        assert_eq!(totals.balance, dec("57782"));
    }

    #[test]
    fn test_sale_subtracts_deductions_from_grand_total() {
        let mut tx = voucher(
            TransactionType::Sale,
            vec![priced_line("107562")],
            vec![charge("tc_1", "ch_hamali"), charge("tc_2", "ch_gunny")],
        );
        tx.amount_received = dec("50000");

        let totals = compute_totals(&tx, &deduction_heads(), None);
        assert_eq!(totals.grand_total, dec("107382"));
        assert_eq!(totals.balance, dec("57382"));
    }

    #[test]
    fn test_asami_and_zero_dalal_use_standard_sign() {
        for tx_type in [TransactionType::Asami, TransactionType::ZeroDalal] {
            let tx = voucher(
                tx_type,
                vec![priced_line("1000")],
                vec![charge("tc_1", "ch_hamali")],
            );
            let totals = compute_totals(&tx, &deduction_heads(), None);
            assert_eq!(totals.grand_total, dec("800"), "{tx_type:?}");
        }
    }

    #[test]
    fn test_balance_negative_on_overpayment() {
        let mut tx = voucher(TransactionType::Sale, vec![priced_line("1000")], vec![]);
        tx.amount_received = dec("1500");
        let totals = compute_totals(&tx, &deduction_heads(), None);
        assert_eq!(totals.balance, dec("-500"));
    }

    #[test]
    fn test_tds_amount_tracked_separately() {
        let mut heads = deduction_heads();
        heads.push(head("ch_tds", "TDS", Kind::Deduction, Calc::PercentOfSubtotal, "1"));
        let tx = voucher(
            TransactionType::Purchase,
            vec![priced_line("107562")],
            vec![charge("tc_1", "ch_tds")],
        );
        let totals = compute_totals(&tx, &heads, None);
        assert_eq!(totals.tds_amount, Decimal::ZERO);
        assert_eq!(totals.total_deductions, Decimal::ZERO);
    }

    #[test]
    fn test_monetary_only_vouchers_yield_zero_totals() {
        for tx_type in [TransactionType::Payment, TransactionType::Cash] {
            let mut tx = voucher(tx_type, vec![], vec![]);
            tx.amount_received = dec("25000");
            assert_eq!(
                compute_totals(&tx, &deduction_heads(), None),
                TransactionTotals::zero(),
                "{tx_type:?}"
            );
        }
    }

    #[test]
    fn test_compute_totals_idempotent() {
        let mut tx = voucher(
            TransactionType::Purchase,
            vec![priced_line("107562")],
            vec![charge("tc_1", "ch_hamali"), charge("tc_2", "ch_gunny")],
        );
        tx.amount_received = dec("50000");
        let heads = deduction_heads();
        let p = party(false, None);

        let first = compute_totals(&tx, &heads, Some(&p));
        let second = compute_totals(&tx, &heads, Some(&p));
        assert_eq!(first, second);

        let a = refresh_voucher(&mut tx, &heads, Some(&p));
        let b = refresh_voucher(&mut tx, &heads, Some(&p));
        assert_eq!(a, b);
        assert_eq!(a, first);
    }
}
