//! Browse engine for the perfume catalog.
//!
//! Ties the matcher and a `CatalogStore` together into the state machine
//! behind a filterable, paginated, infinitely scrolling list with debounced
//! type-ahead:
//! - `BrowseState`: criteria, page and visible window, with subscriptions
//! - `SyncController`: turns state changes into tokened fetch requests
//! - `SuggestionController`: debounce timer, suggestion tokens, keyboard
//!   navigation
//! - `BrowseEngine`: owns all of the above and runs the event loop

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod navigation;
pub mod pagination;
pub mod state;
pub mod suggestions;
pub mod sync;
pub mod timer;
pub mod token;
pub mod window;

pub use config::BrowseConfig;
pub use engine::{BrowseEngine, SearchMode};
pub use error::{BrowseError, Concern};
pub use event::EngineEvent;
pub use navigation::{NavKey, NavOutcome, navigate};
pub use pagination::{PaginationState, PaginationSummary};
pub use state::{BrowseState, StateChange};
pub use suggestions::{KeyAction, SuggestionController, SuggestionQueryState, SuggestionRequest};
pub use sync::{CountRequest, FetchRequest, PageRequest, SyncController};
pub use timer::DebounceTimer;
pub use token::{RequestToken, TokenCounter};
pub use window::VisibleWindow;
