//! Query state of a geocoder widget
//!
//! Every transition returns a new `QueryState`; nothing is edited in place.

use crate::geo::Feature;
use serde::Serialize;
use std::collections::HashSet;

/// Text value, current suggestions and whether the value came from a selection
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryState {
    pub value: String,
    pub suggestions: Vec<Feature>,
    pub selected: bool,
}

impl QueryState {
    /// Typed text: new value, no longer a selection
    pub fn with_value(&self, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            suggestions: self.suggestions.clone(),
            selected: false,
        }
    }

    /// Empty value, not selected. Suggestions are kept.
    pub fn cleared(&self) -> Self {
        self.with_value(String::new())
    }

    /// Replace suggestions, dropping repeated labels
    pub fn with_suggestions(&self, features: Vec<Feature>) -> Self {
        Self {
            value: self.value.clone(),
            suggestions: unique_by_label(features),
            selected: self.selected,
        }
    }

    pub fn without_suggestions(&self) -> Self {
        Self {
            value: self.value.clone(),
            suggestions: Vec::new(),
            selected: self.selected,
        }
    }

    /// Value chosen from a suggestion or a reverse lookup
    pub fn with_selection(&self, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            suggestions: self.suggestions.clone(),
            selected: true,
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.suggestions.iter().map(Feature::label).collect()
    }
}

/// Keep the first feature for each label, in order
pub fn unique_by_label(features: Vec<Feature>) -> Vec<Feature> {
    let mut seen = HashSet::new();
    features
        .into_iter()
        .filter(|f| seen.insert(f.label().to_string()))
        .collect()
}
