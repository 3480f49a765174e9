//! Validation and correction of parsed rows.
//!
//! Steps, in order: future-date filter, income/expense sign correction,
//! outlier flagging, duplicate flagging. Only the first step removes rows;
//! the rest add notices.

use chrono::NaiveDate;
use spendlens_core::{Notice, Transaction, is_income_category};
use spendlens_ingest::{ParsedExport, RawTransaction};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Outlier detection needs at least this many expenses
pub const MIN_OUTLIER_SAMPLE: usize = 4;

/// Transactions that survived validation, plus every notice raised so far
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedLedger {
    pub transactions: Vec<Transaction>,
    pub notices: Vec<Notice>,
}

/// Run every validation step over a parsed export.
///
/// `today` is the processing date; rows dated after it are dropped.
pub fn validate(export: ParsedExport, today: NaiveDate) -> ValidatedLedger {
    let date_column_unreadable = export.date_column_unreadable();
    let date_values = export.date_values;
    let mut notices = export.notices;

    // 1. future-dated rows
    if date_column_unreadable {
        notices.push(Notice::warning(format!(
            "Date parsing error: none of the {} values in the Date column could be parsed",
            date_values
        )));
    }
    let before = export.rows.len();
    let kept: Vec<RawTransaction> = export
        .rows
        .into_iter()
        .filter(|r| r.date.is_none_or(|d| d <= today))
        .collect();
    let removed = before - kept.len();
    if removed > 0 {
        notices.push(Notice::warning(format!(
            "Removed {} future-dated transactions",
            removed
        )));
    }

    // 2 + 3. classification and sign correction, one pass
    let mut transactions = Vec::with_capacity(kept.len());
    for raw in kept {
        let (txn, note) = correct_sign(raw);
        if let Some(note) = note {
            notices.push(note);
        }
        transactions.push(txn);
    }

    // 4. outliers
    if let Some(n) = count_extreme_outliers(&transactions).filter(|&n| n > 0) {
        notices.push(Notice::warning(format!(
            "Found {} extreme expense outliers",
            n
        )));
    }

    // 5. duplicates
    let dupes = count_duplicates(&transactions);
    if dupes > 0 {
        notices.push(Notice::warning(format!(
            "Found {} potential duplicate transactions",
            dupes
        )));
    }

    for n in &notices {
        if n.is_warning() {
            warn!("{}", n.message);
        } else {
            info!("{}", n.message);
        }
    }
    debug!(
        kept = transactions.len(),
        removed,
        notices = notices.len(),
        "validation complete"
    );

    ValidatedLedger {
        transactions,
        notices,
    }
}

/// Apply the sign rules to one row.
///
/// Income with a negative amount is flipped to positive and reported.
/// A non-income positive amount is flipped to negative unless the
/// description mentions a refund; that flip is not reported.
pub fn correct_sign(raw: RawTransaction) -> (Transaction, Option<Notice>) {
    let is_income = is_income_category(&raw.category);
    let mut note = None;
    let amount = if is_income && raw.amount < 0.0 {
        debug!(row = raw.row, amount = raw.amount, "income sign corrected");
        note = Some(Notice::info(format!(
            "Corrected income sign at row {}",
            raw.row
        )));
        raw.amount.abs()
    } else if !is_income && raw.amount > 0.0 && !raw.description.to_lowercase().contains("refund")
    {
        debug!(row = raw.row, amount = raw.amount, "expense sign corrected");
        -raw.amount
    } else {
        raw.amount
    };

    let txn = Transaction::new(raw.row, raw.date, amount, raw.category, raw.description);
    (txn, note)
}

/// Quantile of sorted values, linear interpolation between closest ranks
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Expenses below `Q1 - 1.5 * IQR`.
/// `None` when there are fewer than [`MIN_OUTLIER_SAMPLE`] expenses.
pub fn count_extreme_outliers(transactions: &[Transaction]) -> Option<usize> {
    let mut expenses: Vec<f64> = transactions
        .iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount)
        .collect();
    if expenses.len() < MIN_OUTLIER_SAMPLE {
        return None;
    }
    expenses.sort_by(|a, b| a.total_cmp(b));

    let q1 = quantile(&expenses, 0.25)?;
    let q3 = quantile(&expenses, 0.75)?;
    let lower_bound = q1 - 1.5 * (q3 - q1);
    debug!(q1, q3, lower_bound, "expense IQR bounds");

    Some(expenses.iter().filter(|&&a| a < lower_bound).count())
}

/// Rows sharing an exact (date, description, amount) with at least one other row
pub fn count_duplicates(transactions: &[Transaction]) -> usize {
    let mut groups: HashMap<(Option<NaiveDate>, &str, u64), usize> = HashMap::new();
    for t in transactions {
        // 0.0 and -0.0 compare equal but have different bits
        let amount = if t.amount == 0.0 { 0.0_f64 } else { t.amount };
        *groups
            .entry((t.date, t.description.as_str(), amount.to_bits()))
            .or_insert(0) += 1;
    }
    groups.values().filter(|&&c| c >= 2).sum()
}
