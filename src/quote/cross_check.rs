use rust_decimal::Decimal;

use crate::{
    types::{CrossCheckResult, Result},
    utils::math,
};

/// Compare the router's price against the reserve-derived effective price.
///
/// Divergence is measured relative to `effective_price`. Exceeding the
/// tolerance is reported in the result, not as an error.
pub fn cross_check(router_price: Decimal, effective_price: Decimal, tolerance_percent: Decimal) -> Result<CrossCheckResult> {
    let divergence_percent = math::divergence_percent(router_price, effective_price)?;

    Ok(CrossCheckResult {
        router_price,
        effective_price,
        divergence_percent,
        tolerance_percent,
        within_tolerance: divergence_percent <= tolerance_percent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuoterError;
    use rust_decimal_macros::dec;

    #[test]
    fn test_identical_prices() {
        let result = cross_check(dec!(1992.013962), dec!(1992.013962), dec!(0.5)).unwrap();
        assert_eq!(result.divergence_percent, Decimal::ZERO);
        assert!(result.within_tolerance);
    }

    #[test]
    fn test_divergence_beyond_tolerance() {
        let result = cross_check(dec!(2020), dec!(2000), dec!(0.5)).unwrap();
        assert_eq!(result.divergence_percent, dec!(1));
        assert!(!result.within_tolerance);
        assert_eq!(result.tolerance_percent, dec!(0.5));
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        let result = cross_check(dec!(1990), dec!(2000), dec!(0.5)).unwrap();
        assert_eq!(result.divergence_percent, dec!(0.5));
        assert!(result.within_tolerance);
    }

    #[test]
    fn test_zero_effective_price() {
        let err = cross_check(dec!(1), Decimal::ZERO, dec!(0.5)).unwrap_err();
        assert!(matches!(err, QuoterError::DegeneratePool(_)));
    }
}
