//! At-most-one in-flight selection.
//!
//! A session starts when the user asks to pick an element and ends when a
//! selection arrives, when it times out, or when it is cancelled. Only the
//! most recently started session's result is accepted; results carrying an
//! older id are dropped.

use std::time::{Duration, Instant};

/// How long a selection may stay in flight before it is abandoned.
pub const SELECTION_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct SelectionSession {
    timeout: Duration,
    next_id: u64,
    in_flight: Option<(SessionId, Instant)>,
    latest: Option<SessionId>,
}

impl SelectionSession {
    pub fn new() -> Self {
        Self {
            timeout: SELECTION_TIMEOUT,
            next_id: 0,
            in_flight: None,
            latest: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Begin a new session. Returns `None` while another one is still in
    /// flight and inside its timeout.
    pub fn start(&mut self, now: Instant) -> Option<SessionId> {
        if self.is_selecting(now) {
            log::debug!("Selection already in progress; ignoring start");
            return None;
        }
        self.next_id += 1;
        let id = SessionId(self.next_id);
        self.in_flight = Some((id, now));
        self.latest = Some(id);
        log::debug!("Selection {} started", id);
        Some(id)
    }

    /// Whether a session is in flight and has not yet timed out.
    pub fn is_selecting(&self, now: Instant) -> bool {
        self.in_flight
            .is_some_and(|(_, started)| now.saturating_duration_since(started) < self.timeout)
    }

    /// Expire the in-flight session if its timeout has passed. Returns the
    /// id that just timed out.
    pub fn poll(&mut self, now: Instant) -> Option<SessionId> {
        let (id, started) = self.in_flight?;
        if now.saturating_duration_since(started) < self.timeout {
            return None;
        }
        self.in_flight = None;
        log::warn!("Selection {} timed out after {:?}", id, self.timeout);
        Some(id)
    }

    /// Accept a result for `id`. Only the latest session's id is accepted,
    /// even if it already timed out; anything older is stale.
    pub fn complete(&mut self, id: SessionId) -> bool {
        if self.latest != Some(id) {
            log::debug!("Dropping stale selection {}", id);
            return false;
        }
        self.in_flight = None;
        true
    }

    pub fn cancel(&mut self) {
        if let Some((id, _)) = self.in_flight.take() {
            log::debug!("Selection {} cancelled", id);
        }
    }

    /// Fraction of the timeout already used by the in-flight session.
    pub fn progress(&self, now: Instant) -> Option<f32> {
        let (_, started) = self.in_flight?;
        let elapsed = now.saturating_duration_since(started).as_secs_f32();
        Some((elapsed / self.timeout.as_secs_f32()).min(1.0))
    }
}

impl Default for SelectionSession {
    fn default() -> Self {
        Self::new()
    }
}
