//! Necessity scores: how essential spending in a category is judged to be

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Score for categories the table does not know
pub const DEFAULT_NECESSITY: f64 = 0.50;

const BUILTIN_SCORES: &[(&str, f64)] = &[
    ("groceries", 0.95),
    ("food", 0.95),
    ("rent", 0.95),
    ("utilities", 0.95),
    ("housing", 0.95),
    ("healthcare", 0.90),
    ("transport", 0.85),
    ("transportation", 0.85),
    ("insurance", 0.85),
    ("education", 0.80),
    ("childcare", 0.85),
    ("phone", 0.70),
    ("internet", 0.75),
    ("income", 1.0),
    ("salary", 1.0),
    ("gym", 0.40),
    ("entertainment", 0.30),
    ("dining", 0.35),
    ("eating out", 0.35),
    ("hobbies", 0.25),
    ("subscriptions", 0.20),
    ("shopping", 0.15),
    ("other", 0.50),
];

/// Lookup key for a category: trimmed and lowercased
pub fn category_key(category: &str) -> String {
    category.trim().to_lowercase()
}

/// Immutable category → necessity mapping.
///
/// Built once (defaults plus optional overrides) and passed by reference to
/// every scoring call.
#[derive(Debug, Clone, PartialEq)]
pub struct NecessityTable {
    scores: HashMap<String, f64>,
}

impl Default for NecessityTable {
    fn default() -> Self {
        Self {
            scores: BUILTIN_SCORES
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }
}

impl NecessityTable {
    /// A table holding exactly the given entries, nothing built in
    pub fn from_entries<K: AsRef<str>>(
        entries: impl IntoIterator<Item = (K, f64)>,
    ) -> Result<Self> {
        let mut table = Self {
            scores: HashMap::new(),
        };
        table.insert_all(entries)?;
        Ok(table)
    }

    /// The built-in table with `overrides` replacing or adding entries
    pub fn with_overrides<K: AsRef<str>>(
        mut self,
        overrides: impl IntoIterator<Item = (K, f64)>,
    ) -> Result<Self> {
        self.insert_all(overrides)?;
        Ok(self)
    }

    fn insert_all<K: AsRef<str>>(
        &mut self,
        entries: impl IntoIterator<Item = (K, f64)>,
    ) -> Result<()> {
        for (category, score) in entries {
            let key = category_key(category.as_ref());
            if !(0.0..=1.0).contains(&score) {
                return Err(Error::InvalidNecessity {
                    category: key,
                    score,
                });
            }
            self.scores.insert(key, score);
        }
        Ok(())
    }

    /// Case-insensitive lookup; unknown categories score [`DEFAULT_NECESSITY`]
    pub fn score(&self, category: &str) -> f64 {
        self.scores
            .get(&category_key(category))
            .copied()
            .unwrap_or(DEFAULT_NECESSITY)
    }
}

/// Qualitative band of a necessity score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Assessment {
    #[serde(rename = "essential")]
    Essential,
    #[serde(rename = "important")]
    Important,
    #[serde(rename = "discretionary")]
    Discretionary,
    #[serde(rename = "cut-candidate")]
    CutCandidate,
}

impl Assessment {
    /// Bands use inclusive lower bounds: 0.90, 0.70, 0.40
    pub fn from_necessity(necessity: f64) -> Self {
        if necessity >= 0.9 {
            Assessment::Essential
        } else if necessity >= 0.7 {
            Assessment::Important
        } else if necessity >= 0.4 {
            Assessment::Discretionary
        } else {
            Assessment::CutCandidate
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Assessment::Essential => "✓",
            Assessment::Important => "→",
            Assessment::Discretionary => "?",
            Assessment::CutCandidate => "✗",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Assessment::Essential => "Essential",
            Assessment::Important => "Important",
            Assessment::Discretionary => "Discretionary",
            Assessment::CutCandidate => "Could Cut",
        }
    }

    /// Spending advice for a category in this band
    pub fn advice(&self) -> &'static str {
        match self {
            Assessment::Essential => {
                "High-necessity expense (essential) - not recommended to cut."
            }
            Assessment::Important => "Important but could be reviewed for small savings.",
            Assessment::Discretionary => {
                "Moderately necessary - consider trimming recurring or frequency."
            }
            Assessment::CutCandidate => {
                "Low-necessity discretionary spend - good candidate to cut."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_scores() {
        let table = NecessityTable::default();
        assert_eq!(table.score("groceries"), 0.95);
        assert_eq!(table.score("Eating Out"), 0.35);
        assert_eq!(table.score("SHOPPING"), 0.15);
        assert_eq!(table.score("salary"), 1.0);
        assert_eq!(BUILTIN_SCORES.len(), 23);
        assert!(BUILTIN_SCORES.iter().all(|(k, v)| table.score(k) == *v));
    }

    #[test]
    fn test_lookup_is_case_insensitive_and_pure() {
        let table = NecessityTable::default();
        let a = table.score("Rent");
        let b = table.score("rent");
        let c = table.score("  RENT ");
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(table.score("Rent"), a);
    }

    #[test]
    fn test_unknown_category_is_neutral() {
        let table = NecessityTable::default();
        assert_eq!(table.score("crypto"), DEFAULT_NECESSITY);
        assert_eq!(table.score(""), 0.50);
    }

    #[test]
    fn test_overrides() {
        let table = NecessityTable::default()
            .with_overrides([("Gym", 0.6), ("pets", 0.8)])
            .unwrap();
        assert_eq!(table.score("gym"), 0.6);
        assert_eq!(table.score("pets"), 0.8);
        assert_eq!(table.score("groceries"), 0.95);
    }

    #[test]
    fn test_rejects_out_of_range_scores() {
        let err = NecessityTable::default()
            .with_overrides([("gym", 1.5)])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidNecessity { .. }));

        assert!(NecessityTable::from_entries([("x", -0.1)]).is_err());
        assert!(NecessityTable::from_entries([("x", f64::NAN)]).is_err());
    }

    #[test]
    fn test_custom_table_has_no_builtins() {
        let table = NecessityTable::from_entries([("coffee", 0.1)]).unwrap();
        assert_eq!(table.score("coffee"), 0.1);
        assert_eq!(table.score("groceries"), DEFAULT_NECESSITY);
    }

    #[test]
    fn test_assessment_bands() {
        assert_eq!(Assessment::from_necessity(1.0), Assessment::Essential);
        assert_eq!(Assessment::from_necessity(0.9), Assessment::Essential);
        assert_eq!(Assessment::from_necessity(0.85), Assessment::Important);
        assert_eq!(Assessment::from_necessity(0.7), Assessment::Important);
        assert_eq!(Assessment::from_necessity(0.5), Assessment::Discretionary);
        assert_eq!(Assessment::from_necessity(0.4), Assessment::Discretionary);
        assert_eq!(Assessment::from_necessity(0.35), Assessment::CutCandidate);
        assert_eq!(Assessment::CutCandidate.symbol(), "✗");
    }
}
