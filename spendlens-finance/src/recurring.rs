//! Recurring payment detection: descriptions seen more than once

use serde::{Deserialize, Serialize};
use spendlens_core::{Transaction, round2};
use std::collections::HashMap;
use tracing::debug;

/// Fewest occurrences that count as recurring
pub const MIN_OCCURRENCES: usize = 2;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurringPayment {
    /// Lowercased, trimmed description shared by the group
    pub description: String,
    pub count: usize,
    /// Mean of the signed amounts, in cents
    pub average_amount: f64,
    /// Category of the first occurrence
    pub category: String,
}

/// Group transactions by description and keep groups of two or more.
///
/// Sorted by `|average_amount|` descending; equal magnitudes keep the order
/// in which their description first appeared.
pub fn identify_recurring_payments(transactions: &[Transaction]) -> Vec<RecurringPayment> {
    // (description, first category, amounts), in first-seen order
    let mut groups: Vec<(String, &str, Vec<f64>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for t in transactions {
        let key = t.description.trim().to_lowercase();
        match index.get(&key).copied() {
            Some(i) => groups[i].2.push(t.amount),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, t.category.as_str(), vec![t.amount]));
            }
        }
    }

    let mut recurring: Vec<RecurringPayment> = groups
        .into_iter()
        .filter(|(_, _, amounts)| amounts.len() >= MIN_OCCURRENCES)
        .map(|(description, category, amounts)| {
            let count = amounts.len();
            let average = amounts.iter().sum::<f64>() / count as f64;
            RecurringPayment {
                description,
                count,
                average_amount: round2(average),
                category: category.to_string(),
            }
        })
        .collect();

    recurring.sort_by(|a, b| b.average_amount.abs().total_cmp(&a.average_amount.abs()));
    debug!(groups = index.len(), recurring = recurring.len(), "recurring payments");
    recurring
}

/// Sum of every recurring average (signed)
pub fn monthly_recurring_total(recurring: &[RecurringPayment]) -> f64 {
    round2(recurring.iter().map(|r| r.average_amount).sum())
}
