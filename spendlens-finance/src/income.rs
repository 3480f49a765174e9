//! Income prediction: monthly run-rate of money coming in

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use spendlens_core::{Transaction, round2};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct IncomePrediction {
    pub predicted_monthly_income: f64,
    /// Number of positive-amount rows, not months
    pub transaction_count: usize,
}

/// Average of per-month totals of positive amounts.
///
/// Undated rows are left out of the monthly buckets but still counted.
/// When no positive row carries a date, the plain sum stands in for one month.
pub fn predict_incoming_money(transactions: &[Transaction]) -> IncomePrediction {
    let incomes: Vec<&Transaction> = transactions.iter().filter(|t| t.is_credit()).collect();
    if incomes.is_empty() {
        return IncomePrediction::default();
    }

    let mut monthly: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for t in &incomes {
        if let Some(d) = t.date {
            *monthly.entry((d.year(), d.month())).or_insert(0.0) += t.amount;
        }
    }

    let predicted = if monthly.is_empty() {
        debug!("no dated income; using total as a single month");
        incomes.iter().map(|t| t.amount).sum()
    } else {
        monthly.values().sum::<f64>() / monthly.len() as f64
    };
    debug!(months = monthly.len(), income_rows = incomes.len(), "income prediction");

    IncomePrediction {
        predicted_monthly_income: round2(predicted),
        transaction_count: incomes.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(date: Option<(i32, u32, u32)>, amount: f64) -> Transaction {
        let date = date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
        Transaction::new(0, date, amount, "Salary", "Employer")
    }

    #[test]
    fn test_no_income() {
        let p = predict_incoming_money(&[t(Some((2024, 1, 1)), -10.0)]);
        assert_eq!(p.predicted_monthly_income, 0.0);
        assert_eq!(p.transaction_count, 0);
    }

    #[test]
    fn test_mean_of_monthly_sums() {
        let p = predict_incoming_money(&[
            t(Some((2024, 1, 1)), 1000.0),
            t(Some((2024, 1, 15)), 1000.0),
            t(Some((2024, 2, 1)), 1000.0),
            t(Some((2024, 2, 3)), -500.0),
        ]);
        // (2000 + 1000) / 2 months
        assert_eq!(p.predicted_monthly_income, 1500.0);
        assert_eq!(p.transaction_count, 3);
    }

    #[test]
    fn test_same_month_different_years() {
        let p = predict_incoming_money(&[
            t(Some((2023, 3, 1)), 100.0),
            t(Some((2024, 3, 1)), 300.0),
        ]);
        assert_eq!(p.predicted_monthly_income, 200.0);
    }

    #[test]
    fn test_undated_income_falls_back_to_sum() {
        let p = predict_incoming_money(&[t(None, 400.0), t(None, 100.5)]);
        assert_eq!(p.predicted_monthly_income, 500.5);
        assert_eq!(p.transaction_count, 2);
    }

    #[test]
    fn test_undated_rows_counted_but_not_bucketed() {
        let p = predict_incoming_money(&[t(Some((2024, 5, 1)), 1200.0), t(None, 50.0)]);
        assert_eq!(p.predicted_monthly_income, 1200.0);
        assert_eq!(p.transaction_count, 2);
    }
}
