//! Quiet-interval debouncer with an IME composition gate
//!
//! Time is passed in explicitly as milliseconds so the state machine can be
//! driven by a browser timer, a test, or anything in between.

/// Input must be stable this long before annotation runs
pub const DEBOUNCE_MS: u64 = 500;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Debouncer {
    interval_ms: u64,
    quiet_since: Option<u64>,
    composing: bool,
}

impl Debouncer {
    pub fn new(interval_ms: u64) -> Self {
        Self {
            interval_ms,
            quiet_since: None,
            composing: false,
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    /// Restart the quiet interval at `now`
    pub fn touch(&mut self, now: u64) {
        self.quiet_since = Some(now);
    }

    pub fn composition_start(&mut self) {
        self.composing = true;
    }

    /// Composition finished; the interval restarts from `now`
    pub fn composition_end(&mut self, now: u64) {
        self.composing = false;
        self.touch(now);
    }

    pub fn is_composing(&self) -> bool {
        self.composing
    }

    /// Whether the pending change has settled by `now`
    ///
    /// Fires at most once per touch. Nothing fires while composing.
    pub fn fire(&mut self, now: u64) -> bool {
        if self.composing {
            return false;
        }
        match self.quiet_since {
            Some(since) if now.saturating_sub(since) >= self.interval_ms => {
                self.quiet_since = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEBOUNCE_MS)
    }
}
