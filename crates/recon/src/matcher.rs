use std::collections::HashMap;

use strmarket_match::find_best_match;

use crate::config::JoinStrategy;
use crate::model::{JoinKind, RentRecord};

/// Join key: lowercased and trimmed. Punctuation is kept, unlike the fuzzy matcher.
pub fn join_key(label: &str) -> String {
    label.trim().to_lowercase()
}

/// A rent row found for a revenue label.
#[derive(Debug, Clone, PartialEq)]
pub struct RentMatch<'a> {
    pub rent_label: &'a str,
    pub rent: f64,
    pub kind: JoinKind,
    pub similarity: f64,
}

/// Rent values keyed by [`join_key`].
///
/// Duplicate keys overwrite the earlier value (last write wins) but keep the
/// first slot, so fuzzy candidates are scanned in first-seen order.
#[derive(Debug, Default)]
pub struct RentIndex {
    entries: Vec<(String, f64)>,
    by_key: HashMap<String, usize>,
}

impl RentIndex {
    pub fn build(rent_data: &[RentRecord]) -> Self {
        let mut index = Self::default();
        for record in rent_data {
            let key = join_key(&record.label);
            match index.by_key.get(&key) {
                Some(&slot) => index.entries[slot] = (record.label.clone(), record.rent),
                None => {
                    index.by_key.insert(key, index.entries.len());
                    index.entries.push((record.label.clone(), record.rent));
                }
            }
        }
        index
    }

    /// Number of distinct join keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup_exact(&self, label: &str) -> Option<RentMatch<'_>> {
        let slot = *self.by_key.get(&join_key(label))?;
        let (rent_label, rent) = &self.entries[slot];
        Some(RentMatch {
            rent_label: rent_label.as_str(),
            rent: *rent,
            kind: JoinKind::Exact,
            similarity: 1.0,
        })
    }

    /// Exact key first; otherwise the most similar rent label at or above `threshold`.
    pub fn lookup_fuzzy(&self, label: &str, threshold: f64) -> Option<RentMatch<'_>> {
        if let Some(exact) = self.lookup_exact(label) {
            return Some(exact);
        }

        let labels: Vec<&str> = self.entries.iter().map(|(l, _)| l.as_str()).collect();
        let best = find_best_match(label, &labels, threshold)?;
        let slot = *self.by_key.get(&join_key(&best.matched))?;
        let (rent_label, rent) = &self.entries[slot];
        Some(RentMatch {
            rent_label: rent_label.as_str(),
            rent: *rent,
            kind: JoinKind::Fuzzy,
            similarity: best.similarity,
        })
    }

    pub fn lookup(&self, label: &str, strategy: JoinStrategy, threshold: f64) -> Option<RentMatch<'_>> {
        match strategy {
            JoinStrategy::ExactKey => self.lookup_exact(label),
            JoinStrategy::Fuzzy => self.lookup_fuzzy(label, threshold),
        }
    }
}
