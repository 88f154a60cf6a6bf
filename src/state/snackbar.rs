//! Transient notifications.
//!
//! The visible queue lives in `state.local.snackbars`; [`SnackbarQueue`] keeps the
//! dismissal deadlines next to it in the shell, since `Instant` has no business
//! inside the shared state.

use crate::state::State;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default auto-dismiss delay.
pub const DEFAULT_SNACKBAR_TIMEOUT: Duration = Duration::from_millis(1000);

/// Append a notification to the visible queue.
pub fn show_snackbar(state: &mut State, text: impl Into<String>) {
    state.local.snackbars.push(text.into());
}

/// Remove the oldest notification equal to `text`. Returns whether one was found.
pub fn dismiss_snackbar(state: &mut State, text: &str) -> bool {
    let snackbars = &mut state.local.snackbars;
    match snackbars.iter().position(|s| s == text) {
        Some(index) => {
            snackbars.remove(index);
            true
        }
        None => false,
    }
}

/// Dismissal deadlines, oldest first.
#[derive(Debug, Clone)]
pub struct SnackbarQueue {
    timeout: Duration,
    deadlines: VecDeque<(Instant, String)>,
}

impl SnackbarQueue {
    /// Queue dismissing after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            deadlines: VecDeque::new(),
        }
    }

    /// Time each snackbar stays up.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Schedule `text` for dismissal `timeout` after `now`.
    pub fn schedule(&mut self, text: impl Into<String>, now: Instant) {
        self.deadlines.push_back((now + self.timeout, text.into()));
    }

    /// Texts whose deadline has passed at `now`, in the order they were shown.
    pub fn expired(&mut self, now: Instant) -> Vec<String> {
        let mut expired = Vec::new();
        while let Some((deadline, _)) = self.deadlines.front() {
            if *deadline > now {
                break;
            }
            if let Some((_, text)) = self.deadlines.pop_front() {
                expired.push(text);
            }
        }
        expired
    }

    /// Time until the next dismissal, if any is pending.
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.deadlines
            .front()
            .map(|(deadline, _)| deadline.saturating_duration_since(now))
    }

    /// Whether no dismissal is pending.
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}

impl Default for SnackbarQueue {
    fn default() -> Self {
        Self::new(DEFAULT_SNACKBAR_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_and_dismiss_first_match() {
        let mut state = State::default();
        show_snackbar(&mut state, "Copied");
        show_snackbar(&mut state, "Error");
        show_snackbar(&mut state, "Copied");

        assert!(dismiss_snackbar(&mut state, "Copied"));
        assert_eq!(state.local.snackbars, vec!["Error", "Copied"]);
        assert!(!dismiss_snackbar(&mut state, "missing"));
    }

    #[test]
    fn nothing_expires_before_timeout() {
        let start = Instant::now();
        let mut queue = SnackbarQueue::new(Duration::from_millis(1000));
        queue.schedule("Copied", start);

        assert!(queue.expired(start + Duration::from_millis(999)).is_empty());
        assert_eq!(
            queue.next_deadline(start + Duration::from_millis(400)),
            Some(Duration::from_millis(600))
        );
    }

    #[test]
    fn expires_in_order_at_deadline() {
        let start = Instant::now();
        let mut queue = SnackbarQueue::new(Duration::from_millis(1000));
        queue.schedule("first", start);
        queue.schedule("second", start + Duration::from_millis(500));

        assert_eq!(queue.expired(start + Duration::from_millis(1000)), vec!["first"]);
        assert_eq!(queue.expired(start + Duration::from_millis(2000)), vec!["second"]);
        assert!(queue.is_empty());
        assert_eq!(queue.next_deadline(start), None);
    }

    #[test]
    fn default_timeout_is_one_second() {
        assert_eq!(SnackbarQueue::default().timeout(), Duration::from_millis(1000));
    }
}
