//! Debounced type-ahead suggestions.
//!
//! Keystrokes restart a debounce timer; only when typing pauses for the
//! configured delay is one suggestion request issued, for the text at that
//! moment. Responses carry a token and only the latest one is shown.
//!
//! ## Lifecycle
//! - non-empty text: (re)arm the debounce timer
//! - empty text: cancel the timer and clear the list at once
//! - timer elapsed: issue a request for the trimmed text
//! - blur: close the list after a short grace period, so a click on a
//!   suggestion still lands

use crate::error::{BrowseError, Concern};
use crate::event::EngineEvent;
use crate::navigation::{NavKey, NavOutcome, navigate};
use crate::token::{RequestToken, TokenCounter};
use crate::timer::DebounceTimer;
use catalog_store::StoreError;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A suggestion request ready to be sent to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub token: RequestToken,
    pub prefix: String,
}

/// What the engine should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    None,
    /// Search for this text
    Commit(String),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SuggestionQueryState {
    pub input_text: String,
    /// Prefix of the latest issued request
    pub prefix: String,
    pub results: Vec<String>,
    pub open: bool,
    pub selected: Option<usize>,
}

pub struct SuggestionController {
    state: SuggestionQueryState,
    tokens: TokenCounter,
    debounce: DebounceTimer,
    blur: DebounceTimer,
    limit: usize,
}

impl SuggestionController {
    pub fn new(debounce: Duration, blur_grace: Duration, limit: usize) -> Self {
        Self {
            state: SuggestionQueryState::default(),
            tokens: TokenCounter::new(Concern::Suggestions),
            debounce: DebounceTimer::new(debounce),
            blur: DebounceTimer::new(blur_grace),
            limit,
        }
    }

    pub fn state(&self) -> &SuggestionQueryState {
        &self.state
    }

    pub fn results(&self) -> &[String] {
        &self.state.results
    }

    /// True while a debounce or blur timer is waiting to fire.
    pub fn has_armed_timers(&self) -> bool {
        self.debounce.is_armed() || self.blur.is_armed()
    }

    pub fn on_text_changed(&mut self, text: &str, events: &mpsc::UnboundedSender<EngineEvent>) {
        self.state.input_text = text.to_string();

        if text.trim().is_empty() {
            self.debounce.cancel();
            self.tokens.supersede();
            self.clear();
            return;
        }

        let tx = events.clone();
        self.debounce.schedule(move |generation| {
            let _ = tx.send(EngineEvent::DebounceElapsed { generation });
        });
    }

    /// Debounce elapsed: issue a request for the current text.
    pub fn on_debounce_elapsed(&mut self, generation: u64) -> Option<SuggestionRequest> {
        if !self.debounce.fire(generation) {
            return None;
        }
        let prefix = self.state.input_text.trim();
        if prefix.is_empty() {
            return None;
        }

        let token = self.tokens.issue();
        self.state.prefix = prefix.to_string();
        debug!("suggestions: issuing {} for {:?}", token, self.state.prefix);
        Some(SuggestionRequest {
            token,
            prefix: self.state.prefix.clone(),
        })
    }

    /// Apply a suggestion response. A failed fetch empties the list.
    pub fn apply(
        &mut self,
        token: RequestToken,
        result: Result<Vec<String>, StoreError>,
    ) -> Result<(), BrowseError> {
        self.tokens.complete(token)?;
        match result {
            Ok(mut names) => {
                names.truncate(self.limit);
                self.state.open = !names.is_empty();
                self.state.results = names;
                self.state.selected = None;
                Ok(())
            }
            Err(e) => {
                warn!("suggestions: fetch failed: {}", e);
                self.clear();
                Err(BrowseError::FetchFailed {
                    concern: Concern::Suggestions,
                    message: e.to_string(),
                })
            }
        }
    }

    /// Handle a navigation key.
    pub fn on_key(&mut self, key: NavKey) -> KeyAction {
        let len = if self.state.open { self.state.results.len() } else { 0 };
        match navigate(key, self.state.selected, len) {
            NavOutcome::Moved(index) => {
                self.state.selected = Some(index);
                KeyAction::None
            }
            NavOutcome::Commit(index) => {
                let name = self.state.results[index].clone();
                self.select(&name);
                KeyAction::Commit(name)
            }
            NavOutcome::Submit => {
                let text = self.state.input_text.clone();
                self.select(&text);
                KeyAction::Commit(text)
            }
            NavOutcome::Close => {
                self.close();
                KeyAction::None
            }
            NavOutcome::Ignored => KeyAction::None,
        }
    }

    /// Accept `name` as the query text: the list closes and anything still
    /// pending for the old text is dropped.
    pub fn select(&mut self, name: &str) {
        self.debounce.cancel();
        self.blur.cancel();
        self.tokens.supersede();
        self.state.input_text = name.to_string();
        self.clear();
    }

    pub fn on_focus(&mut self) {
        self.blur.cancel();
        self.state.open = !self.state.results.is_empty();
    }

    pub fn on_blur(&mut self, events: &mpsc::UnboundedSender<EngineEvent>) {
        let tx = events.clone();
        self.blur.schedule(move |generation| {
            let _ = tx.send(EngineEvent::BlurGraceElapsed { generation });
        });
    }

    pub fn on_blur_elapsed(&mut self, generation: u64) {
        if self.blur.fire(generation) {
            self.close();
        }
    }

    fn close(&mut self) {
        self.state.open = false;
        self.state.selected = None;
    }

    fn clear(&mut self) {
        self.state.results.clear();
        self.close();
    }
}
