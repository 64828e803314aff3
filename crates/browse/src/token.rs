//! Monotonic request tokens.
//!
//! Every issued request gets a token from the counter of its concern. A
//! response is applied only if its token is still the latest one issued;
//! this is the only ordering guarantee against out-of-order completions.

use crate::error::{BrowseError, Concern};
use std::fmt;

/// Tag attached to an issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues strictly increasing tokens for one concern.
#[derive(Debug)]
pub struct TokenCounter {
    concern: Concern,
    issued: u64,
    /// Token of the latest request still awaiting its response
    pending: Option<RequestToken>,
}

impl TokenCounter {
    pub fn new(concern: Concern) -> Self {
        Self {
            concern,
            issued: 0,
            pending: None,
        }
    }

    /// Issue a new token; every earlier token becomes stale.
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.pending = Some(token);
        token
    }

    /// Make every outstanding token stale without issuing a request.
    pub fn supersede(&mut self) {
        self.issued += 1;
        self.pending = None;
    }

    pub fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    /// True while the latest issued request has not completed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Accept the response for `token` if it is the latest, clearing the
    /// pending marker; otherwise report it as stale.
    pub fn complete(&mut self, token: RequestToken) -> Result<(), BrowseError> {
        if !self.is_latest(token) {
            return Err(BrowseError::StaleResponseDiscarded {
                concern: self.concern,
                token: token.0,
                latest: self.issued,
            });
        }
        self.pending = None;
        Ok(())
    }
}
