//! Cancellable one-shot timers.
//!
//! Each `schedule` call cancels the previous timer and starts a new sleep
//! task tagged with a fresh generation number. When the sleep ends the task
//! hands the generation to its callback; the owner then calls `fire` and
//! only the current generation is accepted. Aborting the task is
//! best-effort, so the generation check is what discards a timer that was
//! cancelled after it had already fired.

use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct DebounceTimer {
    delay: Duration,
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl DebounceTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            handle: None,
        }
    }

    /// Cancel any pending timer and start a new one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, on_elapsed: F) -> u64
    where
        F: FnOnce(u64) + Send + 'static,
    {
        self.cancel();
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        let delay = self.delay;
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_elapsed(generation);
        }));
        generation
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    /// Accept an elapsed notification. Returns true only for the current,
    /// uncancelled generation; the timer is disarmed afterwards.
    pub fn fire(&mut self, generation: u64) -> bool {
        if self.handle.is_none() || generation != self.generation {
            return false;
        }
        self.handle = None;
        true
    }
}

impl Drop for DebounceTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
