//! Text helpers shared by the console and HTML renderers

use chrono::NaiveDate;
use spendlens_core::Assessment;

/// Uppercase the first letter of every word, lowercase the rest.
/// Any non-letter starts a new word.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// `$1,234.50`, with the sign ahead of the dollar
pub fn currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${}", format_num::format_num!(",.2", value.abs()))
}

pub fn date_or_blank(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

/// `✓ Essential`
pub fn assessment_text(a: Assessment) -> String {
    format!("{} {}", a.symbol(), a.label())
}

/// First `max` characters
pub fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
