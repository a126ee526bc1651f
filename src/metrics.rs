//! Pure derived-metric math, run strictly after extraction.

use crate::fx::FxQuote;

/// Percentage gap between two quotes' sell prices: `(other/reference - 1) * 100`.
///
/// `None` when either sell is absent or the reference sells at zero. The gap
/// is reported unavailable in that case, never as a zero.
pub fn gap_pct(reference: &FxQuote, other: &FxQuote) -> Option<f64> {
    let reference_sell = reference.sell?;
    let other_sell = other.sell?;
    if reference_sell == 0.0 {
        return None;
    }
    Some((other_sell / reference_sell - 1.0) * 100.0)
}

/// Converts an index level into its dollar-linked equivalent using the CCL
/// sell rate. `None` on an absent or zero rate; never divides by zero.
pub fn index_in_usd(index_value: f64, ccl_sell: Option<f64>) -> Option<f64> {
    let rate = ccl_sell?;
    if rate == 0.0 {
        return None;
    }
    Some(index_value / rate)
}

/// Effective annual rate (TEA) from a nominal annual rate compounded every
/// `term_days` days.
pub fn effective_annual_pct(tna_pct: f64, term_days: u32) -> f64 {
    let periods = 365.0 / f64::from(term_days);
    let period_rate = tna_pct / 100.0 / periods;
    ((1.0 + period_rate).powf(periods) - 1.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(sell: Option<f64>) -> FxQuote {
        FxQuote { buy: None, sell }
    }

    #[test]
    fn gap_matches_the_ratio_formula() {
        let official = quote(Some(980.0));
        let mep = quote(Some(1030.0));
        let ccl = quote(Some(1090.0));

        assert!((gap_pct(&official, &mep).unwrap() - 5.1020).abs() < 0.001);
        assert!((gap_pct(&official, &ccl).unwrap() - 11.2245).abs() < 0.001);
        assert!((gap_pct(&mep, &ccl).unwrap() - 5.8252).abs() < 0.001);
    }

    #[test]
    fn gap_is_unavailable_without_both_sells() {
        assert_eq!(gap_pct(&quote(None), &quote(Some(1030.0))), None);
        assert_eq!(gap_pct(&quote(Some(980.0)), &quote(None)), None);
    }

    #[test]
    fn gap_is_unavailable_on_a_zero_reference() {
        assert_eq!(gap_pct(&quote(Some(0.0)), &quote(Some(1030.0))), None);
    }

    #[test]
    fn index_conversion_uses_the_ccl_sell() {
        let usd = index_in_usd(1_481_000.0, Some(1090.0)).unwrap();
        assert!((usd - 1358.7155).abs() < 0.001);
    }

    #[test]
    fn index_conversion_never_divides_by_zero() {
        assert_eq!(index_in_usd(1_481_000.0, Some(0.0)), None);
        assert_eq!(index_in_usd(1_481_000.0, None), None);
    }

    #[test]
    fn tea_exceeds_tna_for_sub_annual_compounding() {
        let tea = effective_annual_pct(40.0, 30);
        assert!(tea > 40.0);
        assert!((tea - 48.2).abs() < 1.0);
    }
}
