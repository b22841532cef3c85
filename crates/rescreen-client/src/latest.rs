//! Stale-response guard for concurrent feature invocations.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Issues monotonically increasing tickets; only the latest is accepted.
///
/// Callers take a ticket before starting a request and check it before
/// applying the response, so a slow early response never clobbers the
/// result of a later one.
#[derive(Debug, Default)]
pub struct LatestRequest {
    issued: AtomicU64,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new request, invalidating all earlier tickets.
    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True only for the most recently issued ticket.
    pub fn accept(&self, ticket: Ticket) -> bool {
        ticket.0 == self.issued.load(Ordering::SeqCst)
    }
}
