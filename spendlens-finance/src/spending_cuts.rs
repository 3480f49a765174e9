//! Spending-cut recommendations: expense categories ranked by how much
//! could be trimmed without touching essentials.

use serde::{Deserialize, Serialize};
use spendlens_core::{Assessment, NecessityTable, Transaction, category_key, round2};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Never suggested while their necessity is at least [`PROTECTED_MIN_NECESSITY`]
pub const PROTECTED_CATEGORIES: [&str; 3] = ["rent", "housing", "mortgage"];
pub const PROTECTED_MIN_NECESSITY: f64 = 0.9;

/// Cuts at or below this amount are noise
pub const MIN_POTENTIAL_CUT: f64 = 1.0;

pub const DEFAULT_TOP_CUTS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpendingCutSuggestion {
    /// Lowercased category
    pub category: String,
    /// Total spent, as a positive number
    pub amount: f64,
    /// `amount * (1 - necessity)`
    pub potential_cut: f64,
    pub necessity: f64,
}

impl SpendingCutSuggestion {
    pub fn assessment(&self) -> Assessment {
        Assessment::from_necessity(self.necessity)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub category: String,
    pub amount: f64,
    pub potential_cut: f64,
    pub necessity: f64,
    pub reason: String,
}

impl From<&SpendingCutSuggestion> for Recommendation {
    fn from(s: &SpendingCutSuggestion) -> Self {
        Self {
            category: s.category.clone(),
            amount: s.amount,
            potential_cut: s.potential_cut,
            necessity: s.necessity,
            reason: s.assessment().advice().to_string(),
        }
    }
}

/// Every expense category worth a look, largest potential cut first.
///
/// Categories are visited alphabetically, so equal cuts stay alphabetical.
pub fn analyze_spending(
    transactions: &[Transaction],
    table: &NecessityTable,
) -> Vec<SpendingCutSuggestion> {
    let mut by_category: BTreeMap<String, f64> = BTreeMap::new();
    for t in transactions.iter().filter(|t| t.is_expense()) {
        *by_category.entry(category_key(&t.category)).or_insert(0.0) += t.amount;
    }

    let mut suggestions = Vec::new();
    for (category, total) in by_category {
        let total_abs = total.abs();
        let necessity = table.score(&category);
        let potential_cut = total_abs * (1.0 - necessity);

        if PROTECTED_CATEGORIES.contains(&category.as_str())
            && necessity >= PROTECTED_MIN_NECESSITY
        {
            debug!(%category, necessity, "skipping protected category");
            continue;
        }
        if potential_cut <= MIN_POTENTIAL_CUT {
            debug!(%category, potential_cut, "skipping negligible cut");
            continue;
        }

        suggestions.push(SpendingCutSuggestion {
            category,
            amount: round2(total_abs),
            potential_cut: round2(potential_cut),
            necessity,
        });
    }

    suggestions.sort_by(|a, b| b.potential_cut.total_cmp(&a.potential_cut));
    debug!(count = suggestions.len(), "spending cut suggestions");
    suggestions
}

/// The first `top_n` distinct categories, each with advice for its band
pub fn get_recommendations(
    suggestions: &[SpendingCutSuggestion],
    top_n: usize,
) -> Vec<Recommendation> {
    let mut seen = HashSet::new();
    suggestions
        .iter()
        .filter(|s| seen.insert(s.category.as_str()))
        .take(top_n)
        .map(Recommendation::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(amount: f64, cat: &str) -> Transaction {
        Transaction::new(0, None, amount, cat, "x")
    }

    #[test]
    fn test_groups_case_insensitively() {
        let table = NecessityTable::default();
        let s = analyze_spending(
            &[t(-30.0, "Dining"), t(-20.0, "dining"), t(-50.0, " DINING")],
            &table,
        );
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].category, "dining");
        assert_eq!(s[0].amount, 100.0);
        assert_eq!(s[0].potential_cut, 65.0);
        assert_eq!(s[0].necessity, 0.35);
    }

    #[test]
    fn test_rent_never_suggested() {
        let table = NecessityTable::default();
        let s = analyze_spending(&[t(-1200.0, "Rent"), t(-40.0, "Shopping")], &table);
        assert!(s.iter().all(|c| c.category != "rent"));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_protected_category_with_low_score_is_suggested() {
        let table = NecessityTable::default()
            .with_overrides([("mortgage", 0.5)])
            .unwrap();
        let s = analyze_spending(&[t(-1000.0, "Mortgage")], &table);
        assert_eq!(s[0].category, "mortgage");
        assert_eq!(s[0].potential_cut, 500.0);
    }

    #[test]
    fn test_small_cuts_skipped() {
        let table = NecessityTable::default();
        // groceries: 10 * 0.05 = 0.5; other: 2 * 0.5 = 1.0; shopping: 1 * 0.85
        let s = analyze_spending(
            &[t(-10.0, "Groceries"), t(-2.0, "Other"), t(-1.0, "Shopping")],
            &table,
        );
        assert!(s.is_empty());
        for c in analyze_spending(&[t(-500.0, "Groceries"), t(-3.0, "Gym")], &table) {
            assert!(c.potential_cut > MIN_POTENTIAL_CUT);
        }
    }

    #[test]
    fn test_income_ignored() {
        let table = NecessityTable::default();
        let s = analyze_spending(&[t(5000.0, "Shopping")], &table);
        assert!(s.is_empty());
    }

    #[test]
    fn test_sorted_desc_ties_alphabetical() {
        let table = NecessityTable::default();
        let s = analyze_spending(
            &[
                t(-100.0, "Zoo"),
                t(-100.0, "Arcade"),
                t(-400.0, "Shopping"),
                t(-100.0, "Groceries"),
            ],
            &table,
        );
        let cats: Vec<&str> = s.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(cats, vec!["shopping", "arcade", "zoo", "groceries"]);
    }

    #[test]
    fn test_recommendations_top_n_with_reasons() {
        let table = NecessityTable::default();
        let categories = [
            "Shopping",
            "Dining",
            "Gym",
            "Hobbies",
            "Phone",
            "Other",
            "Insurance",
        ];
        let txns: Vec<Transaction> = categories.iter().map(|c| t(-100.0, c)).collect();
        let recs = get_recommendations(&analyze_spending(&txns, &table), DEFAULT_TOP_CUTS);
        assert_eq!(recs.len(), 5);
        assert_eq!(recs[0].category, "shopping");
        assert_eq!(
            recs[0].reason,
            "Low-necessity discretionary spend - good candidate to cut."
        );
        let phone = get_recommendations(&analyze_spending(&[t(-100.0, "Phone")], &table), 5);
        assert_eq!(phone[0].reason, "Important but could be reviewed for small savings.");
    }

    #[test]
    fn test_recommendations_skip_repeats() {
        let s = SpendingCutSuggestion {
            category: "dining".into(),
            amount: 10.0,
            potential_cut: 6.5,
            necessity: 0.35,
        };
        let recs = get_recommendations(&[s.clone(), s], 5);
        assert_eq!(recs.len(), 1);
    }
}
