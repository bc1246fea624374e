use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::view::ResultView;

/// Sequence number handed out for each submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// Result container keyed by the latest issued request.
///
/// A completion only reaches the view if its ticket is still the newest, so a
/// slow response cannot replace the result of a later submission.
pub struct ResultSlot<V> {
    latest: AtomicU64,
    view: Mutex<V>,
}

impl<V: ResultView> ResultSlot<V> {
    pub fn new(view: V) -> Self {
        Self {
            latest: AtomicU64::new(0),
            view: Mutex::new(view),
        }
    }

    /// Starts a new request. Any ticket issued before this one is stale.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Applies `update` to the view if `ticket` is still current. Returns
    /// whether the update was applied.
    pub fn commit<F>(&self, ticket: Ticket, update: F) -> bool
    where
        F: FnOnce(&mut V),
    {
        let mut view = self.view.lock().expect("result view lock poisoned");
        // Checked under the lock so a newer commit can't interleave.
        if !self.is_latest(ticket) {
            return false;
        }
        update(&mut view);
        true
    }

    pub fn with_view<R>(&self, f: impl FnOnce(&V) -> R) -> R {
        let view = self.view.lock().expect("result view lock poisoned");
        f(&view)
    }

    pub fn into_inner(self) -> V {
        self.view
            .into_inner()
            .expect("result view lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::PageView;

    #[test]
    fn test_tickets_increase() {
        let slot = ResultSlot::new(PageView::default());
        let a = slot.issue();
        let b = slot.issue();
        assert!(b > a);
        assert_eq!(a.seq() + 1, b.seq());
        assert!(!slot.is_latest(a));
        assert!(slot.is_latest(b));
    }

    #[test]
    fn test_stale_commit_is_dropped() {
        let slot = ResultSlot::new(PageView::default());
        let first = slot.issue();
        let second = slot.issue();

        assert!(slot.commit(second, |v| v.set_content("second".to_string())));
        assert!(!slot.commit(first, |v| v.set_content("first".to_string())));

        assert_eq!(slot.with_view(|v| v.content.clone()), "second");
    }

    #[test]
    fn test_latest_ticket_can_commit_repeatedly() {
        let slot = ResultSlot::new(PageView::default());
        let ticket = slot.issue();
        assert!(slot.commit(ticket, |v| v.show()));
        assert!(slot.commit(ticket, |v| v.set_content("x".to_string())));
        let view = slot.into_inner();
        assert!(view.visible);
        assert_eq!(view.content, "x");
    }
}
