use super::amount::{round2, saturating_sum, RawAmount};
use super::caps::{CapTable, CapWarning, Section};
use super::declaration::DeclarationState;
use rust_decimal::Decimal;

/// Result of recalculating a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recomputed {
    pub total: Decimal,
    pub warnings: Vec<CapWarning>,
}

/// Total exemption: the three amounts coerced (unreadable counts as zero),
/// summed (clamped at the Decimal range), and rounded to 2 places.
pub fn compute_total(
    section_80c: &RawAmount,
    section_80d: &RawAmount,
    other: &RawAmount,
) -> Decimal {
    round2(saturating_sum([
        section_80c.coerce(),
        section_80d.coerce(),
        other.coerce(),
    ]))
}

/// Cap breaches, 80C first then 80D. Other exemptions are never capped.
pub fn compute_warnings(
    section_80c: &RawAmount,
    section_80d: &RawAmount,
    _other: &RawAmount,
    caps: &CapTable,
) -> Vec<CapWarning> {
    cap_breaches(section_80c.coerce(), section_80d.coerce(), caps)
}

pub(crate) fn cap_breaches(
    section_80c: Decimal,
    section_80d: Decimal,
    caps: &CapTable,
) -> Vec<CapWarning> {
    [(Section::S80C, section_80c), (Section::S80D, section_80d)]
        .into_iter()
        .filter_map(|(section, amount)| caps.check(section, amount))
        .collect()
}

/// Single recalculation entry point for the declaration form.
pub fn recompute(state: &DeclarationState, caps: &CapTable) -> Recomputed {
    let total = compute_total(
        &state.section_80c_amount,
        &state.section_80d_amount,
        &state.other_exemptions,
    );
    let warnings = compute_warnings(
        &state.section_80c_amount,
        &state.section_80d_amount,
        &state.other_exemptions,
        caps,
    );
    log::debug!("Recomputed total {} with {} warning(s)", total, warnings.len());
    Recomputed { total, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn raw(n: f64) -> RawAmount {
        RawAmount::Number(n)
    }

    #[test]
    fn total_of_typical_declaration() {
        let total = compute_total(&raw(100000.0), &raw(20000.0), &raw(5000.0));
        assert_eq!(total, dec!(125000.00));
        assert_eq!(total.to_string(), "125000.00");
    }

    #[test]
    fn total_of_missing_inputs_is_zero() {
        let missing = RawAmount::Missing;
        let total = compute_total(&missing, &missing, &missing);
        assert_eq!(total.to_string(), "0.00");
    }

    #[test]
    fn non_numeric_input_counts_as_zero() {
        let total = compute_total(&RawAmount::from("abc"), &raw(1.0), &raw(1.0));
        assert_eq!(total.to_string(), "2.00");
    }

    #[test]
    fn total_rounds_half_away_from_zero() {
        let total = compute_total(
            &RawAmount::from("0.004"),
            &RawAmount::from("0.001"),
            &RawAmount::Missing,
        );
        assert_eq!(total, dec!(0.01));
    }

    #[test]
    fn total_is_order_independent() {
        let a = RawAmount::from("1234.567");
        let b = RawAmount::from("89.1");
        let c = RawAmount::from("0.333");
        let expected = compute_total(&a, &b, &c);
        assert_eq!(compute_total(&b, &c, &a), expected);
        assert_eq!(compute_total(&c, &a, &b), expected);
        assert_eq!(expected.scale(), 2);
    }

    #[test]
    fn total_is_idempotent() {
        let a = RawAmount::from("10.10");
        let b = raw(20.2);
        let c = RawAmount::Missing;
        assert_eq!(compute_total(&a, &b, &c), compute_total(&a, &b, &c));
    }

    #[test]
    fn huge_text_amounts_clamp_instead_of_overflowing() {
        let max = RawAmount::from("79228162514264337593543950335");
        let total = compute_total(&max, &max, &RawAmount::Missing);
        assert_eq!(total, Decimal::MAX);
    }

    #[test]
    fn out_of_range_number_still_breaches_cap() {
        let result = recompute(
            &DeclarationState::new(raw(1e30), raw(0.0), raw(0.0)),
            &CapTable::default(),
        );
        assert_eq!(result.total, Decimal::MAX);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].section, Section::S80C);
    }

    #[test]
    fn warns_on_80c_only() {
        let warnings = compute_warnings(
            &raw(160000.0),
            &raw(10000.0),
            &raw(0.0),
            &CapTable::default(),
        );
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].section, Section::S80C);
        assert!(warnings[0].to_string().contains("80C"));
    }

    #[test]
    fn warns_on_both_in_check_order() {
        let warnings = compute_warnings(
            &raw(160000.0),
            &raw(60000.0),
            &raw(0.0),
            &CapTable::default(),
        );
        let sections: Vec<_> = warnings.iter().map(|w| w.section).collect();
        assert_eq!(sections, vec![Section::S80C, Section::S80D]);
    }

    #[test]
    fn no_warnings_within_caps() {
        let warnings = compute_warnings(
            &raw(100000.0),
            &raw(40000.0),
            &raw(0.0),
            &CapTable::default(),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn other_exemptions_are_never_capped() {
        let warnings = compute_warnings(
            &raw(0.0),
            &raw(0.0),
            &raw(10_000_000.0),
            &CapTable::default(),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn overridden_caps_are_used() {
        let caps = CapTable::default().with_cap(Section::S80C, dec!(200000));
        let warnings = compute_warnings(&raw(160000.0), &raw(0.0), &raw(0.0), &caps);
        assert!(warnings.is_empty());
    }

    #[test]
    fn recompute_combines_total_and_warnings() {
        let state = DeclarationState::new(raw(160000.0), "abc", raw(500.0));
        let result = recompute(&state, &CapTable::default());
        assert_eq!(result.total, dec!(160500.00));
        assert_eq!(result.warnings.len(), 1);
    }
}
