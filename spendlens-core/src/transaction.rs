//! Validated transaction record

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category substrings that mark a transaction as money coming in
pub const INCOME_KEYWORDS: [&str; 5] = ["salary", "income", "bonus", "refund", "deposit"];

/// True if the category text contains any income keyword (case-insensitive)
pub fn is_income_category(category: &str) -> bool {
    let lower = category.to_lowercase();
    INCOME_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// A transaction after normalization and validation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Zero-based data row in the source file
    pub row: usize,
    /// None when the source value could not be parsed
    pub date: Option<NaiveDate>,
    /// Positive = money in, negative = money out
    pub amount: f64,
    pub category: String,
    pub description: String,
    /// Derived from the category text
    pub is_income: bool,
}

impl Transaction {
    /// Build a transaction, deriving `is_income` from the category.
    /// The amount is taken as given; sign correction is the validator's job.
    pub fn new(
        row: usize,
        date: Option<NaiveDate>,
        amount: f64,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let category = category.into();
        Self {
            row,
            date,
            amount,
            is_income: is_income_category(&category),
            category,
            description: description.into(),
        }
    }

    /// Money out
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Money in
    pub fn is_credit(&self) -> bool {
        self.amount > 0.0
    }

    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }

    /// True if the description mentions a refund
    pub fn mentions_refund(&self) -> bool {
        self.description.to_lowercase().contains("refund")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_income_keywords() {
        assert!(is_income_category("Salary"));
        assert!(is_income_category("Monthly INCOME"));
        assert!(is_income_category("Tax Refund"));
        assert!(is_income_category("direct deposit"));
        assert!(is_income_category("Bonus"));
        assert!(!is_income_category("Groceries"));
        assert!(!is_income_category("Other"));
    }

    #[test]
    fn test_transaction_creation() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 10);
        let t = Transaction::new(0, date, 2000.0, "Salary", "Employer");
        assert!(t.is_income);
        assert!(t.is_credit());
        assert!(!t.is_expense());
        assert_eq!(t.abs_amount(), 2000.0);

        let e = Transaction::new(1, date, -50.0, "Groceries", "Store A Refund");
        assert!(!e.is_income);
        assert!(e.is_expense());
        assert!(e.mentions_refund());
    }
}
