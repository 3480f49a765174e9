//! The assembled report handed to renderers

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use spendlens_core::{Notice, Transaction, round2};

use crate::income::IncomePrediction;
use crate::projection::InvestmentProjection;
use crate::rating::TransactionRating;
use crate::recurring::RecurringPayment;
use crate::spending_cuts::Recommendation;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub total_income: f64,
    /// Negative: the sum of all outgoing amounts
    pub total_spent: f64,
    pub net_balance: f64,
    pub transaction_count: usize,
}

pub fn generate_summary(transactions: &[Transaction]) -> Summary {
    let total_income: f64 = transactions
        .iter()
        .filter(|t| t.is_credit())
        .map(|t| t.amount)
        .sum();
    let total_spent: f64 = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .sum();
    Summary {
        total_income: round2(total_income),
        total_spent: round2(total_spent),
        net_balance: round2(total_income + total_spent),
        transaction_count: transactions.len(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dashboard {
    pub processing_date: NaiveDate,
    pub notices: Vec<Notice>,
    pub summary: Summary,
    pub incoming_money: IncomePrediction,
    pub recurring_payments: Vec<RecurringPayment>,
    pub spending_cuts: Vec<Recommendation>,
    pub top_questionable_spending: Vec<TransactionRating>,
    pub transaction_ratings: Vec<TransactionRating>,
    pub investment_projection: InvestmentProjection,
}
