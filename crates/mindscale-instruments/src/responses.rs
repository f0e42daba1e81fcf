use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Per-session answer accumulator: question id → selected option value.
///
/// An unanswered question is simply absent. Scoring treats absence as 0 and
/// ignores ids that belong to no known question, so a partial or
/// forward-versioned accumulator is always a valid input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Responses(BTreeMap<String, i32>);

impl Responses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for literal accumulators.
    pub fn with(mut self, question_id: impl Into<String>, value: i32) -> Self {
        self.0.insert(question_id.into(), value);
        self
    }

    /// Record an answer, returning the value it replaced.
    pub fn insert(&mut self, question_id: impl Into<String>, value: i32) -> Option<i32> {
        self.0.insert(question_id.into(), value)
    }

    pub fn get(&self, question_id: &str) -> Option<i32> {
        self.0.get(question_id).copied()
    }

    pub fn value_or_zero(&self, question_id: &str) -> i32 {
        self.get(question_id).unwrap_or(0)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.0.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, i32)> for Responses {
    fn from_iter<I: IntoIterator<Item = (K, i32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
