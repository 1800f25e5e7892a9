//! Behaviour tests for the geocoder widget against an in-memory backend

use super::*;
use crate::geo::{BoundingBox, Feature, GeocodeResponse};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Search(String),
    Autocomplete {
        text: String,
        focus: Option<Point>,
        bounds: Option<BoundingBox>,
    },
    Reverse {
        point: Option<Point>,
        bounds: Option<BoundingBox>,
    },
}

/// Backend that records calls and answers from canned data
///
/// Autocomplete and search answer with one feature labelled with the query
/// text unless `suggestions` is set.
#[derive(Default)]
struct MockBackend {
    calls: Mutex<Vec<Call>>,
    suggestions: Option<Vec<&'static str>>,
    reverse_labels: Vec<&'static str>,
    latency: HashMap<&'static str, Duration>,
    fail: bool,
}

impl MockBackend {
    fn with_suggestions(mut self, labels: Vec<&'static str>) -> Self {
        self.suggestions = Some(labels);
        self
    }

    fn with_reverse(mut self, labels: Vec<&'static str>) -> Self {
        self.reverse_labels = labels;
        self
    }

    fn with_latency(mut self, text: &'static str, latency: Duration) -> Self {
        self.latency.insert(text, latency);
        self
    }

    fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn autocomplete_texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Autocomplete { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    fn answer(&self, labels: Vec<String>) -> crate::Result<GeocodeResponse> {
        if self.fail {
            return Err(Error::Status {
                endpoint: "/mock".to_string(),
                status: 500,
            });
        }
        Ok(GeocodeResponse::from_features(
            labels.into_iter().map(Feature::with_label).collect(),
        ))
    }
}

impl GeocodeBackend for MockBackend {
    async fn search(&self, text: &str) -> crate::Result<GeocodeResponse> {
        self.calls.lock().unwrap().push(Call::Search(text.to_string()));
        self.answer(vec![text.to_string()])
    }

    async fn autocomplete(
        &self,
        text: &str,
        focus: Option<Point>,
        bounds: Option<BoundingBox>,
    ) -> crate::Result<GeocodeResponse> {
        self.calls.lock().unwrap().push(Call::Autocomplete {
            text: text.to_string(),
            focus,
            bounds,
        });
        if let Some(latency) = self.latency.get(text) {
            tokio::time::sleep(*latency).await;
        }
        let labels = match &self.suggestions {
            Some(labels) => labels.iter().map(|l| l.to_string()).collect(),
            None => vec![text.to_string()],
        };
        self.answer(labels)
    }

    async fn reverse(
        &self,
        point: Option<Point>,
        bounds: Option<BoundingBox>,
    ) -> crate::Result<GeocodeResponse> {
        self.calls.lock().unwrap().push(Call::Reverse { point, bounds });
        self.answer(self.reverse_labels.iter().map(|l| l.to_string()).collect())
    }
}

fn config_with_delay(ms: u64) -> GeocoderConfig {
    GeocoderConfig {
        fetch_delay_ms: ms,
        ..GeocoderConfig::default()
    }
}

async fn settle(duration: Duration) {
    tokio::time::sleep(duration).await;
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_typing_burst_sends_one_autocomplete() {
    let geocoder = Geocoder::new(MockBackend::default(), config_with_delay(150));

    for text in ["1", "12", "123", "123 M", "123 Main"] {
        geocoder.on_change(text);
        geocoder.on_suggestions_fetch_requested(text);
        tokio::time::sleep(Duration::from_millis(40)).await;
    }
    assert!(geocoder.backend().calls().is_empty());

    settle(Duration::from_millis(300)).await;
    assert_eq!(geocoder.backend().autocomplete_texts(), vec!["123 Main"]);
    assert_eq!(geocoder.state().labels(), vec!["123 Main"]);
    assert_eq!(geocoder.state().value, "123 Main");
}

#[tokio::test(start_paused = true)]
async fn test_pauses_longer_than_delay_fetch_each_time() {
    let geocoder = Geocoder::new(MockBackend::default(), config_with_delay(100));

    geocoder.on_suggestions_fetch_requested("12");
    settle(Duration::from_millis(150)).await;
    geocoder.on_suggestions_fetch_requested("123");
    settle(Duration::from_millis(150)).await;

    assert_eq!(geocoder.backend().autocomplete_texts(), vec!["12", "123"]);
}

#[tokio::test(start_paused = true)]
async fn test_failed_debounced_fetch_keeps_state() {
    let geocoder = Geocoder::new(MockBackend::default().failing(), config_with_delay(50));
    geocoder.update("Main");

    geocoder.on_suggestions_fetch_requested("Main");
    settle(Duration::from_millis(100)).await;

    assert_eq!(geocoder.backend().autocomplete_texts(), vec!["Main"]);
    assert_eq!(geocoder.state().value, "Main");
    assert!(geocoder.state().suggestions.is_empty());
}

#[tokio::test]
async fn test_fetch_suggestions_propagates_errors() {
    let geocoder = Geocoder::new(MockBackend::default().failing(), GeocoderConfig::default());
    assert!(geocoder.fetch_suggestions("Main").await.is_err());
}

#[tokio::test]
async fn test_suggestions_deduplicated_by_label() {
    let backend = MockBackend::default().with_suggestions(vec!["A St", "B St", "A St", "C St", "B St"]);
    let geocoder = Geocoder::new(backend, GeocoderConfig::default());

    geocoder.fetch_suggestions("St").await.unwrap();
    assert_eq!(geocoder.state().labels(), vec!["A St", "B St", "C St"]);
}

#[tokio::test]
async fn test_autocomplete_uses_configured_center_and_bounds() {
    let config = GeocoderConfig {
        center: Some(Point::new(40.7, -74.0)),
        bounds: Some(BoundingBox::new(-74.1, 40.6, -73.9, 40.8)),
        ..GeocoderConfig::default()
    };
    let geocoder = Geocoder::new(MockBackend::default(), config);

    geocoder.fetch_suggestions("Main").await.unwrap();
    assert_eq!(
        geocoder.backend().calls(),
        vec![Call::Autocomplete {
            text: "Main".to_string(),
            focus: Some(Point::new(40.7, -74.0)),
            bounds: Some(BoundingBox::new(-74.1, 40.6, -73.9, 40.8)),
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_fetches_last_resolved_wins() {
    let backend = MockBackend::default().with_latency("slow", Duration::from_millis(500));
    let geocoder = Geocoder::new(backend, GeocoderConfig::default());

    let slow = geocoder.clone();
    let pending = tokio::spawn(async move { slow.fetch_suggestions("slow").await });
    tokio::task::yield_now().await;

    geocoder.fetch_suggestions("fast").await.unwrap();
    assert_eq!(geocoder.state().labels(), vec!["fast"]);

    pending.await.unwrap().unwrap();
    assert_eq!(geocoder.state().labels(), vec!["slow"]);
}

#[tokio::test]
async fn test_clear_requested_empties_suggestions() {
    let geocoder = Geocoder::new(MockBackend::default(), GeocoderConfig::default());
    geocoder.update("Main");
    geocoder.fetch_suggestions("Main").await.unwrap();
    assert_eq!(geocoder.state().suggestions.len(), 1);

    geocoder.on_suggestions_clear_requested();
    assert!(geocoder.state().suggestions.is_empty());
    assert_eq!(geocoder.state().value, "Main");
}

#[tokio::test]
async fn test_selecting_suggestion() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let hooks = Hooks::default().on_suggestion_selected(move |event| sink.lock().unwrap().push(event));

    let backend = MockBackend::default().with_suggestions(vec!["123 Main St", "125 Main St"]);
    let geocoder = Geocoder::with_hooks(backend, GeocoderConfig::default(), hooks);

    geocoder.update("Main");
    geocoder.fetch_suggestions("Main").await.unwrap();
    geocoder.select(1, SelectionMethod::Click).await.unwrap();

    let state = geocoder.state();
    assert!(state.selected);
    assert_eq!(state.value, "125 Main St");
    assert!(geocoder
        .backend()
        .calls()
        .contains(&Call::Search("125 Main St".to_string())));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].suggestion_value, "125 Main St");
    assert_eq!(seen[0].suggestion_index, 1);
    assert_eq!(seen[0].section_index, None);
    assert_eq!(seen[0].method, SelectionMethod::Click);
    assert_eq!(seen[0].search.first_label(), Some("125 Main St"));
}

#[tokio::test]
async fn test_select_uses_value_hook() {
    let hooks = Hooks::default().with_suggestion_value(|f| f.label().to_uppercase());
    let backend = MockBackend::default().with_suggestions(vec!["123 Main St"]);
    let geocoder = Geocoder::with_hooks(backend, GeocoderConfig::default(), hooks);

    geocoder.fetch_suggestions("Main").await.unwrap();
    geocoder.select(0, SelectionMethod::Enter).await.unwrap();

    assert_eq!(geocoder.state().value, "123 MAIN ST");
}

#[tokio::test]
async fn test_select_out_of_range() {
    let geocoder = Geocoder::new(MockBackend::default(), GeocoderConfig::default());
    let result = geocoder.select(3, SelectionMethod::Enter).await;

    assert!(matches!(result, Err(Error::NoSuchSuggestion(3))));
    assert!(geocoder.backend().calls().is_empty());
}

#[tokio::test]
async fn test_failed_search_leaves_state() {
    let geocoder = Geocoder::new(MockBackend::default().failing(), GeocoderConfig::default());
    geocoder.update("Main");

    let selection = Selection {
        suggestion: Feature::with_label("123 Main St"),
        suggestion_value: "123 Main St".to_string(),
        suggestion_index: 0,
        section_index: None,
        method: SelectionMethod::Enter,
    };
    assert!(geocoder.on_suggestion_selected(selection).await.is_err());

    let state = geocoder.state();
    assert_eq!(state.value, "Main");
    assert!(!state.selected);
}

#[tokio::test]
async fn test_reverse_geocode_selects_first_label() {
    let calls = Arc::new(Mutex::new(0));
    let counter = calls.clone();
    let hooks = Hooks::default().on_reverse_selected(move |event| {
        assert_eq!(event.search.first_label(), Some("123 Main St"));
        *counter.lock().unwrap() += 1;
    });

    let backend = MockBackend::default().with_reverse(vec!["123 Main St"]);
    let geocoder = Geocoder::with_hooks(backend, GeocoderConfig::default(), hooks);

    let found = geocoder
        .reverse_geocode(Some(Point::new(40.7, -74.0)))
        .await
        .unwrap();

    assert!(found);
    let state = geocoder.state();
    assert_eq!(state.value, "123 Main St");
    assert!(state.selected);
    assert_eq!(*calls.lock().unwrap(), 1);
    assert_eq!(
        geocoder.backend().calls(),
        vec![Call::Reverse {
            point: Some(Point::new(40.7, -74.0)),
            bounds: None,
        }]
    );
}

#[tokio::test]
async fn test_reverse_geocode_no_results_is_noop() {
    let calls = Arc::new(Mutex::new(0));
    let counter = calls.clone();
    let hooks = Hooks::default().on_reverse_selected(move |_| *counter.lock().unwrap() += 1);

    let geocoder = Geocoder::with_hooks(MockBackend::default(), GeocoderConfig::default(), hooks);
    geocoder.update("typed");

    assert!(!geocoder.reverse_geocode(None).await.unwrap());

    let state = geocoder.state();
    assert_eq!(state.value, "typed");
    assert!(!state.selected);
    assert_eq!(*calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn test_reverse_geocode_point_resolution() {
    let config = GeocoderConfig {
        center: Some(Point::new(51.5, -0.12)),
        bounds: Some(BoundingBox::new(-0.5, 51.3, 0.3, 51.7)),
        ..GeocoderConfig::default()
    };
    let geocoder = Geocoder::new(MockBackend::default(), config);

    geocoder.reverse_geocode(None).await.unwrap();
    geocoder
        .reverse_geocode(Some(Point::new(51.4, -0.1)))
        .await
        .unwrap();

    let bounds = Some(BoundingBox::new(-0.5, 51.3, 0.3, 51.7));
    assert_eq!(
        geocoder.backend().calls(),
        vec![
            Call::Reverse {
                point: Some(Point::new(51.5, -0.12)),
                bounds,
            },
            Call::Reverse {
                point: Some(Point::new(51.4, -0.1)),
                bounds,
            },
        ]
    );

    let bare = Geocoder::new(MockBackend::default(), GeocoderConfig::default());
    bare.reverse_geocode(None).await.unwrap();
    assert_eq!(
        bare.backend().calls(),
        vec![Call::Reverse {
            point: None,
            bounds: None
        }]
    );
}

#[tokio::test]
async fn test_reverse_geocode_same_address_twice_reports_found() {
    let calls = Arc::new(Mutex::new(0));
    let counter = calls.clone();
    let hooks = Hooks::default().on_reverse_selected(move |_| *counter.lock().unwrap() += 1);

    let backend = MockBackend::default().with_reverse(vec!["123 Main St"]);
    let geocoder = Geocoder::with_hooks(backend, GeocoderConfig::default(), hooks);
    let point = Some(Point::new(40.7, -74.0));

    assert!(geocoder.reverse_geocode(point).await.unwrap());
    let first = geocoder.state();

    // Same label again: state is unchanged but an address was still found
    assert!(geocoder.reverse_geocode(point).await.unwrap());
    assert_eq!(geocoder.state(), first);
    assert_eq!(*calls.lock().unwrap(), 2);
}

#[tokio::test]
async fn test_clear_always_resets() {
    let backend = MockBackend::default().with_reverse(vec!["123 Main St"]);
    let geocoder = Geocoder::new(backend, GeocoderConfig::default());

    geocoder.clear();
    assert_eq!(geocoder.state().value, "");
    assert!(!geocoder.state().selected);

    geocoder.reverse_geocode(Some(Point::new(40.7, -74.0))).await.unwrap();
    assert!(geocoder.state().selected);

    geocoder.clear();
    assert_eq!(geocoder.state().value, "");
    assert!(!geocoder.state().selected);
}

#[tokio::test]
async fn test_update_drops_selection() {
    let backend = MockBackend::default().with_reverse(vec!["123 Main St"]);
    let geocoder = Geocoder::new(backend, GeocoderConfig::default());

    geocoder.reverse_geocode(Some(Point::new(40.7, -74.0))).await.unwrap();
    geocoder.update("12");

    let state = geocoder.state();
    assert_eq!(state.value, "12");
    assert!(!state.selected);
}

#[test]
fn test_focus_and_blur_delegate_to_input() {
    let geocoder = Geocoder::new(MockBackend::default(), GeocoderConfig::default());
    assert!(!geocoder.is_focused());

    geocoder.focus();
    assert!(geocoder.is_focused());

    geocoder.blur();
    assert!(!geocoder.is_focused());
}

#[tokio::test]
async fn test_subscribers_see_replacements() {
    let geocoder = Geocoder::new(MockBackend::default(), GeocoderConfig::default());
    let mut rx = geocoder.subscribe();

    geocoder.update("Main");
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().value, "Main");

    geocoder.fetch_suggestions("Main").await.unwrap();
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow_and_update().labels(), vec!["Main"]);
}

#[tokio::test]
async fn test_rendered_suggestions_use_render_hook() {
    let hooks = Hooks::default().with_render_suggestion(|f| format!("[{}]", f.label()));
    let backend = MockBackend::default().with_suggestions(vec!["A St", "B St"]);
    let geocoder = Geocoder::with_hooks(backend, GeocoderConfig::default(), hooks);

    geocoder.fetch_suggestions("St").await.unwrap();
    assert_eq!(geocoder.rendered_suggestions(), vec!["[A St]", "[B St]"]);
}
