//! Owner-supplied callbacks

use crate::geo::{Feature, GeocodeResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How the user picked a suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMethod {
    Click,
    Enter,
}

impl std::fmt::Display for SelectionMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Click => write!(f, "click"),
            Self::Enter => write!(f, "enter"),
        }
    }
}

/// A suggestion chosen by the user, as reported by the front-end
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub suggestion: Feature,
    pub suggestion_value: String,
    pub suggestion_index: usize,
    pub section_index: Option<usize>,
    pub method: SelectionMethod,
}

/// Delivered to the owner once the search for a selection has resolved
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionSelected {
    pub search: GeocodeResponse,
    pub suggestion: Feature,
    pub suggestion_value: String,
    pub suggestion_index: usize,
    pub section_index: Option<usize>,
    pub method: SelectionMethod,
}

impl SuggestionSelected {
    pub(crate) fn new(search: GeocodeResponse, selection: Selection) -> Self {
        Self {
            search,
            suggestion: selection.suggestion,
            suggestion_value: selection.suggestion_value,
            suggestion_index: selection.suggestion_index,
            section_index: selection.section_index,
            method: selection.method,
        }
    }
}

/// Delivered to the owner when a reverse lookup found an address
#[derive(Debug, Clone, PartialEq)]
pub struct ReverseSelected {
    pub search: GeocodeResponse,
}

pub type ValueFn = Arc<dyn Fn(&Feature) -> String + Send + Sync>;
pub type RenderFn = Arc<dyn Fn(&Feature) -> String + Send + Sync>;
pub type SelectedFn = Arc<dyn Fn(SuggestionSelected) + Send + Sync>;
pub type ReverseFn = Arc<dyn Fn(ReverseSelected) + Send + Sync>;

/// Callback hooks
///
/// `get_suggestion_value` and `render_suggestion` always exist and default
/// to the feature label. The two selection hooks are optional.
#[derive(Clone)]
pub struct Hooks {
    pub get_suggestion_value: ValueFn,
    pub render_suggestion: RenderFn,
    pub on_suggestion_selected: Option<SelectedFn>,
    pub on_reverse_selected: Option<ReverseFn>,
}

impl Default for Hooks {
    fn default() -> Self {
        Self {
            get_suggestion_value: Arc::new(|f: &Feature| f.label().to_string()),
            render_suggestion: Arc::new(|f: &Feature| f.label().to_string()),
            on_suggestion_selected: None,
            on_reverse_selected: None,
        }
    }
}

impl Hooks {
    pub fn with_suggestion_value(
        mut self,
        f: impl Fn(&Feature) -> String + Send + Sync + 'static,
    ) -> Self {
        self.get_suggestion_value = Arc::new(f);
        self
    }

    pub fn with_render_suggestion(
        mut self,
        f: impl Fn(&Feature) -> String + Send + Sync + 'static,
    ) -> Self {
        self.render_suggestion = Arc::new(f);
        self
    }

    pub fn on_suggestion_selected(
        mut self,
        f: impl Fn(SuggestionSelected) + Send + Sync + 'static,
    ) -> Self {
        self.on_suggestion_selected = Some(Arc::new(f));
        self
    }

    pub fn on_reverse_selected(mut self, f: impl Fn(ReverseSelected) + Send + Sync + 'static) -> Self {
        self.on_reverse_selected = Some(Arc::new(f));
        self
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("on_suggestion_selected", &self.on_suggestion_selected.is_some())
            .field("on_reverse_selected", &self.on_reverse_selected.is_some())
            .finish_non_exhaustive()
    }
}
