//! Geocoder widget
//!
//! A headless controller for an address autocomplete input. It owns the
//! query state, debounces autocomplete requests while the user types,
//! runs a search when a suggestion is picked, and resolves points to
//! addresses. Front-ends render from `state()` or `subscribe()` and feed
//! user events back in.
//!
//! ```no_run
//! use geosuggest::config::GeocoderConfig;
//! use geosuggest::geo::pelias::PeliasClient;
//! use geosuggest::widget::{Geocoder, SelectionMethod};
//!
//! # async fn demo() -> geosuggest::Result<()> {
//! let config = GeocoderConfig::default();
//! let geocoder = Geocoder::new(PeliasClient::new(&config)?, config);
//!
//! geocoder.on_change("123 Main");
//! geocoder.fetch_suggestions("123 Main").await?;
//! geocoder.select(0, SelectionMethod::Enter).await?;
//! println!("{}", geocoder.state().value);
//! # Ok(())
//! # }
//! ```

pub mod debounce;
pub mod hooks;
pub mod input;
pub mod state;

#[cfg(test)]
mod tests;

pub use hooks::{Hooks, ReverseSelected, Selection, SelectionMethod, SuggestionSelected};
pub use input::{FocusFlag, InputHandle};
pub use state::QueryState;

use crate::config::GeocoderConfig;
use crate::error::{Error, Result};
use crate::geo::{GeocodeBackend, Point};
use debounce::Debouncer;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Geocoder widget bound to a backend
///
/// Cloning yields another handle to the same widget.
pub struct Geocoder<B: GeocodeBackend> {
    inner: Arc<Inner<B>>,
}

struct Inner<B: GeocodeBackend> {
    backend: B,
    config: GeocoderConfig,
    hooks: Hooks,
    input: Box<dyn InputHandle>,
    state: watch::Sender<QueryState>,
    debouncer: Debouncer,
}

impl<B: GeocodeBackend> Clone for Geocoder<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<B: GeocodeBackend> Inner<B> {
    fn transition(&self, next: impl FnOnce(&QueryState) -> QueryState) {
        self.state.send_modify(|state| *state = next(state));
    }

    async fn fetch_suggestions(&self, text: &str) -> Result<()> {
        let response = self
            .backend
            .autocomplete(text, self.config.center, self.config.bounds)
            .await?;

        debug!(text, features = response.features.len(), "suggestions received");
        self.transition(|state| state.with_suggestions(response.features));
        Ok(())
    }
}

impl<B: GeocodeBackend> Geocoder<B> {
    /// Create a widget with default hooks and a plain focus flag as input
    pub fn new(backend: B, config: GeocoderConfig) -> Self {
        Self::with_parts(backend, config, Hooks::default(), Box::new(FocusFlag::default()))
    }

    /// Create a widget with owner hooks
    pub fn with_hooks(backend: B, config: GeocoderConfig, hooks: Hooks) -> Self {
        Self::with_parts(backend, config, hooks, Box::new(FocusFlag::default()))
    }

    pub fn with_parts(
        backend: B,
        config: GeocoderConfig,
        hooks: Hooks,
        input: Box<dyn InputHandle>,
    ) -> Self {
        let debouncer = Debouncer::new(config.fetch_delay());
        let (state, _) = watch::channel(QueryState::default());

        Self {
            inner: Arc::new(Inner {
                backend,
                config,
                hooks,
                input,
                state,
                debouncer,
            }),
        }
    }

    pub fn config(&self) -> &GeocoderConfig {
        &self.inner.config
    }

    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    /// Snapshot of the current state
    pub fn state(&self) -> QueryState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state replacement
    pub fn subscribe(&self) -> watch::Receiver<QueryState> {
        self.inner.state.subscribe()
    }

    /// Suggestions as the render hook presents them
    pub fn rendered_suggestions(&self) -> Vec<String> {
        let render = &self.inner.hooks.render_suggestion;
        self.inner
            .state
            .borrow()
            .suggestions
            .iter()
            .map(|feature| render(feature))
            .collect()
    }

    pub fn focus(&self) {
        self.inner.input.focus();
    }

    pub fn blur(&self) {
        self.inner.input.blur();
    }

    pub fn is_focused(&self) -> bool {
        self.inner.input.is_focused()
    }

    /// Replace the value and drop the selected flag
    pub fn update(&self, text: impl Into<String>) {
        let text = text.into();
        self.inner.transition(|state| state.with_value(text));
    }

    pub fn clear(&self) {
        self.inner.transition(QueryState::cleared);
    }

    /// Keystroke from the input
    pub fn on_change(&self, text: impl Into<String>) {
        self.update(text);
    }

    /// Debounced autocomplete
    ///
    /// Returns immediately. Only the last call inside a quiet period reaches
    /// the backend; a failed request is logged and leaves state as it was.
    pub fn on_suggestions_fetch_requested(&self, text: impl Into<String>) {
        let inner = Arc::clone(&self.inner);
        let text = text.into();

        self.inner.debouncer.call(move || async move {
            if let Err(e) = inner.fetch_suggestions(&text).await {
                warn!(error = %e, text = %text, "autocomplete request failed");
            }
        });
    }

    /// Autocomplete right away and report the outcome
    pub async fn fetch_suggestions(&self, text: &str) -> Result<()> {
        self.inner.fetch_suggestions(text).await
    }

    pub fn on_suggestions_clear_requested(&self) {
        self.inner.transition(QueryState::without_suggestions);
    }

    /// Search for the picked suggestion, mark it selected, then tell the owner
    pub async fn on_suggestion_selected(&self, selection: Selection) -> Result<()> {
        let search = self.inner.backend.search(&selection.suggestion_value).await?;

        let value = selection.suggestion_value.clone();
        self.inner.transition(|state| state.with_selection(value));
        info!(
            value = %selection.suggestion_value,
            index = selection.suggestion_index,
            method = %selection.method,
            "suggestion selected"
        );

        if let Some(hook) = &self.inner.hooks.on_suggestion_selected {
            hook(SuggestionSelected::new(search, selection));
        }
        Ok(())
    }

    /// Pick the suggestion at `index` of the current list
    pub async fn select(&self, index: usize, method: SelectionMethod) -> Result<()> {
        let suggestion = self
            .inner
            .state
            .borrow()
            .suggestions
            .get(index)
            .cloned()
            .ok_or(Error::NoSuchSuggestion(index))?;
        let suggestion_value = (self.inner.hooks.get_suggestion_value)(&suggestion);

        self.on_suggestion_selected(Selection {
            suggestion,
            suggestion_value,
            suggestion_index: index,
            section_index: None,
            method,
        })
        .await
    }

    /// Resolve `point`, or the configured center, to an address
    ///
    /// Returns whether an address was selected. With no result the state is
    /// left alone and the owner is not called.
    pub async fn reverse_geocode(&self, point: Option<Point>) -> Result<bool> {
        let point = point.or(self.inner.config.center);
        let search = self
            .inner
            .backend
            .reverse(point, self.inner.config.bounds)
            .await?;

        let Some(label) = search.first_label().map(str::to_string) else {
            debug!(?point, "reverse geocode found nothing");
            return Ok(false);
        };

        info!(label = %label, "reverse geocode selected");
        self.inner.transition(|state| state.with_selection(label));

        if let Some(hook) = &self.inner.hooks.on_reverse_selected {
            hook(ReverseSelected { search });
        }
        Ok(true)
    }
}
