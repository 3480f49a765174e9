//! Investment projection: what the recommended cuts could grow into.
//!
//! Future value of an ordinary annuity with monthly contributions:
//!   FV = PMT * (((1 + r)^n - 1) / r),  r = annual / 12,  n = years * 12

use serde::{Deserialize, Serialize};
use spendlens_core::round2;

use crate::spending_cuts::Recommendation;

/// Annual return rates, in percent
pub const ANNUAL_RATES_PCT: [u32; 3] = [5, 7, 10];

/// Horizons, in years
pub const HORIZONS_YEARS: [u32; 3] = [1, 2, 5];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Projection {
    pub years: u32,
    pub future_value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    /// Annual rate in percent
    pub rate: u32,
    pub projections: Vec<Projection>,
}

impl Scenario {
    pub fn value_at(&self, years: u32) -> Option<f64> {
        self.projections
            .iter()
            .find(|p| p.years == years)
            .map(|p| p.future_value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvestmentProjection {
    pub monthly_savings: f64,
    pub scenarios: Vec<Scenario>,
}

/// Future value of `months` end-of-month payments at `monthly_rate`
pub fn annuity_future_value(payment: f64, monthly_rate: f64, months: u32) -> f64 {
    if monthly_rate == 0.0 {
        return payment * months as f64;
    }
    payment * (((1.0 + monthly_rate).powi(months as i32) - 1.0) / monthly_rate)
}

/// Project the recommended categories' spend as savings.
///
/// The recommendation totals are spread over 12 months to get the monthly
/// contribution.
pub fn investment_projection(recommendations: &[Recommendation]) -> InvestmentProjection {
    let monthly_savings = recommendations.iter().map(|r| r.amount).sum::<f64>() / 12.0;

    let scenarios = ANNUAL_RATES_PCT
        .iter()
        .map(|&rate| {
            let monthly_rate = rate as f64 / 100.0 / 12.0;
            let projections = HORIZONS_YEARS
                .iter()
                .map(|&years| Projection {
                    years,
                    future_value: round2(annuity_future_value(
                        monthly_savings,
                        monthly_rate,
                        years * 12,
                    )),
                })
                .collect();
            Scenario { rate, projections }
        })
        .collect();

    InvestmentProjection {
        monthly_savings: round2(monthly_savings),
        scenarios,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(amount: f64) -> Recommendation {
        Recommendation {
            category: "shopping".into(),
            amount,
            potential_cut: amount * 0.85,
            necessity: 0.15,
            reason: String::new(),
        }
    }

    #[test]
    fn test_zero_savings_projects_zero() {
        let p = investment_projection(&[]);
        assert_eq!(p.monthly_savings, 0.0);
        assert_eq!(p.scenarios.len(), 3);
        for s in &p.scenarios {
            assert_eq!(s.projections.len(), 3);
            assert!(s.projections.iter().all(|pr| pr.future_value == 0.0));
        }
    }

    #[test]
    fn test_monthly_savings_is_total_over_twelve() {
        let p = investment_projection(&[rec(600.0), rec(600.0)]);
        assert_eq!(p.monthly_savings, 100.0);
    }

    #[test]
    fn test_known_future_values() {
        let p = investment_projection(&[rec(1200.0)]);
        let five = &p.scenarios[0];
        assert_eq!(five.rate, 5);
        // 100/month at 5%/12 for 12 months
        assert_eq!(five.value_at(1), Some(1227.89));
        assert_eq!(five.value_at(5), Some(6800.61));
        assert_eq!(p.scenarios[2].rate, 10);
        assert_eq!(p.scenarios[2].value_at(1), Some(1256.56));
        assert_eq!(five.value_at(3), None);
    }

    #[test]
    fn test_values_grow_with_rate_and_time() {
        let p = investment_projection(&[rec(2400.0)]);
        for s in &p.scenarios {
            let v: Vec<f64> = s.projections.iter().map(|x| x.future_value).collect();
            assert!(v[0] < v[1] && v[1] < v[2]);
            // compounding beats plain saving
            assert!(v[0] > 200.0 * 12.0);
        }
        let one_year: Vec<f64> = p.scenarios.iter().filter_map(|s| s.value_at(1)).collect();
        assert!(one_year[0] < one_year[1] && one_year[1] < one_year[2]);
    }

    #[test]
    fn test_annuity_zero_rate() {
        assert_eq!(annuity_future_value(50.0, 0.0, 12), 600.0);
    }
}
