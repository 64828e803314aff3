//! Events delivered to the engine loop.

use crate::token::RequestToken;
use catalog::ResultPage;
use catalog_store::StoreError;

/// Completions of spawned work: timers firing and store calls returning.
#[derive(Debug)]
pub enum EngineEvent {
    DebounceElapsed {
        generation: u64,
    },
    BlurGraceElapsed {
        generation: u64,
    },
    PageLoaded {
        token: RequestToken,
        result: Result<ResultPage, StoreError>,
    },
    CountLoaded {
        token: RequestToken,
        result: Result<u64, StoreError>,
    },
    SuggestionsLoaded {
        token: RequestToken,
        result: Result<Vec<String>, StoreError>,
    },
}

impl EngineEvent {
    /// Whether this event completes a store call.
    pub fn is_fetch_completion(&self) -> bool {
        matches!(
            self,
            EngineEvent::PageLoaded { .. }
                | EngineEvent::CountLoaded { .. }
                | EngineEvent::SuggestionsLoaded { .. }
        )
    }
}
