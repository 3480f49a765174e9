//! Worth-it rating: how much of each transaction is necessity vs. waste

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use spendlens_core::{Assessment, NecessityTable, Transaction, round2};
use tracing::debug;

/// Ratings below this necessity are "questionable"
pub const QUESTIONABLE_BELOW: f64 = 0.70;

/// Default length of the questionable-transactions list
pub const DEFAULT_TOP_QUESTIONABLE: usize = 8;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionRating {
    pub date: Option<NaiveDate>,
    pub description: String,
    pub category: String,
    pub amount: f64,
    pub necessity: f64,
    /// `|amount| * necessity`
    pub worth_it_rating: f64,
    /// `|amount| * (1 - necessity)`
    pub waste_potential: f64,
    pub assessment: Assessment,
}

impl TransactionRating {
    pub fn rate(txn: &Transaction, table: &NecessityTable) -> Self {
        let necessity = table.score(&txn.category);
        let magnitude = txn.abs_amount();
        Self {
            date: txn.date,
            description: txn.description.clone(),
            category: txn.category.clone(),
            amount: txn.amount,
            necessity: round2(necessity),
            worth_it_rating: round2(magnitude * necessity),
            waste_potential: round2(magnitude * (1.0 - necessity)),
            assessment: Assessment::from_necessity(necessity),
        }
    }

    pub fn is_questionable(&self) -> bool {
        self.necessity < QUESTIONABLE_BELOW
    }
}

/// One rating per transaction, in input order
pub fn rate_transaction_worth(
    transactions: &[Transaction],
    table: &NecessityTable,
) -> Vec<TransactionRating> {
    let ratings: Vec<TransactionRating> = transactions
        .iter()
        .map(|t| TransactionRating::rate(t, table))
        .collect();
    debug!(count = ratings.len(), "rated transactions");
    ratings
}

/// Lowest-necessity ratings ordered by waste potential, largest first.
/// Equal waste keeps input order.
pub fn top_questionable_transactions(
    ratings: &[TransactionRating],
    limit: usize,
) -> Vec<TransactionRating> {
    let mut questionable: Vec<TransactionRating> = ratings
        .iter()
        .filter(|r| r.is_questionable())
        .cloned()
        .collect();
    questionable.sort_by(|a, b| b.waste_potential.total_cmp(&a.waste_potential));
    questionable.truncate(limit);
    questionable
}
