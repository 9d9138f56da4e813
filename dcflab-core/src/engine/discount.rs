//! Discounting — factors and present values for a given WACC.

use crate::domain::InvalidAssumption;

/// Discount factor for cash received `year` years out: (1 + r/100)^year.
///
/// The rate must stay above -100% so the compounding base stays positive.
pub fn discount_factor(rate_pct: f64, year: usize) -> Result<f64, InvalidAssumption> {
    if rate_pct <= -100.0 {
        return Err(InvalidAssumption::DiscountRateTooLow(rate_pct));
    }
    Ok((1.0 + rate_pct / 100.0).powi(year as i32))
}

/// Present value of a cash flow received `year` years out.
pub fn present_value(cash_flow: f64, rate_pct: f64, year: usize) -> Result<f64, InvalidAssumption> {
    Ok(cash_flow / discount_factor(rate_pct, year)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_year_one_at_ten_percent() {
        assert!((discount_factor(10.0, 1).unwrap() - 1.1).abs() < 1e-12);
    }

    #[test]
    fn factor_compounds_per_year() {
        assert!((discount_factor(10.0, 2).unwrap() - 1.21).abs() < 1e-12);
        assert!((discount_factor(10.0, 3).unwrap() - 1.331).abs() < 1e-12);
    }

    #[test]
    fn zero_rate_never_discounts() {
        assert!((discount_factor(0.0, 40).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn negative_rate_inflates_present_value() {
        let pv = present_value(100.0, -50.0, 1).unwrap();
        assert!((pv - 200.0).abs() < 1e-9);
    }

    #[test]
    fn present_value_year_one() {
        let pv = present_value(154.0, 10.0, 1).unwrap();
        assert!((pv - 140.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_rate_at_or_below_negative_100() {
        assert!(discount_factor(-100.0, 1).is_err());
        assert!(discount_factor(-150.0, 1).is_err());
        assert!(present_value(1.0, -100.0, 1).is_err());
    }
}
