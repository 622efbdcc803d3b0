use super::Widget;

use crate::{entities::PlaceSuggestion, error::Error};

impl Widget {
    /// Autocomplete for the pickup and destination fields, biased to the current viewport.
    #[tracing::instrument(skip(self))]
    pub async fn suggest(&self, input: &str) -> Result<Vec<PlaceSuggestion>, Error> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(vec![]);
        }

        let center = self.map.lock().await.viewport.center;

        self.maps
            .find_place_suggestions(
                input.into(),
                center,
                self.config.autocomplete_radius,
                self.session_token.to_string(),
            )
            .await
    }
}

#[test]
fn suggestions_are_biased_to_viewport() {
    use super::testing::{FakeMaps, FakePredictor, Journal, RecordingView};
    use crate::config::Config;
    use std::sync::Arc;
    use tokio_test::block_on;

    let journal = Journal::default();
    let maps = Arc::new(
        FakeMaps::new(journal.clone()).with_suggestions(vec![PlaceSuggestion {
            place_id: "ChIJgT_rKAB_PzsRBttnRY6jpz8".into(),
            description: "Bandra West, Mumbai, Maharashtra, India".into(),
        }]),
    );
    let widget = Widget::new(
        Config::default(),
        Arc::new(FakePredictor::new(journal.clone(), vec![])),
        maps.clone(),
        Arc::new(RecordingView::new(journal.clone())),
    );

    let suggestions = block_on(widget.suggest(" Band ")).unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0].description, "Bandra West, Mumbai, Maharashtra, India");

    block_on(widget.suggest("Andh")).unwrap();

    let calls = maps.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].starts_with("Band near 19.076,72.8777 within 50000"));

    // both fields share one autocomplete session
    let session = format!("({})", widget.session_token);
    assert!(calls.iter().all(|call| call.ends_with(&session)));
}

#[test]
fn blank_input_skips_lookup() {
    use super::testing::{FakeMaps, FakePredictor, Journal, RecordingView};
    use crate::config::Config;
    use std::sync::Arc;
    use tokio_test::block_on;

    let journal = Journal::default();
    let maps = Arc::new(FakeMaps::new(journal.clone()));
    let widget = Widget::new(
        Config::default(),
        Arc::new(FakePredictor::new(journal.clone(), vec![])),
        maps.clone(),
        Arc::new(RecordingView::new(journal.clone())),
    );

    assert!(block_on(widget.suggest("  ")).unwrap().is_empty());
    assert!(maps.calls().is_empty());
}
