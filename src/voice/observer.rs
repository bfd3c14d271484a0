//! Subscribe/unsubscribe fan-out for typed engine events.

use std::sync::mpsc::{self, Receiver, Sender};

/// Handle returned by [`Subscribers::subscribe`]
pub struct Subscription<E> {
    pub id: u64,
    pub events: Receiver<E>,
}

impl<E> Subscription<E> {
    /// Drain pending events (non-blocking)
    pub fn poll_events(&self) -> Vec<E> {
        self.events.try_iter().collect()
    }
}

/// Registered observers of one event type
pub struct Subscribers<E> {
    next_id: u64,
    senders: Vec<(u64, Sender<E>)>,
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self {
            next_id: 1,
            senders: Vec::new(),
        }
    }
}

impl<E: Clone> Subscribers<E> {
    pub fn subscribe(&mut self) -> Subscription<E> {
        let (tx, rx) = mpsc::channel();
        let id = self.next_id;
        self.next_id += 1;
        self.senders.push((id, tx));
        Subscription { id, events: rx }
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: u64) -> bool {
        let before = self.senders.len();
        self.senders.retain(|(sub_id, _)| *sub_id != id);
        self.senders.len() != before
    }

    /// Deliver to every live subscriber; dropped receivers are pruned
    pub fn emit(&mut self, event: &E) {
        self.senders.retain(|(_, tx)| tx.send(event.clone()).is_ok());
    }

    pub fn len(&self) -> usize {
        self.senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_reaches_all_subscribers() {
        let mut subs = Subscribers::<u32>::default();
        let a = subs.subscribe();
        let b = subs.subscribe();

        subs.emit(&7);

        assert_eq!(a.poll_events(), vec![7]);
        assert_eq!(b.poll_events(), vec![7]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut subs = Subscribers::<u32>::default();
        let a = subs.subscribe();
        assert!(subs.unsubscribe(a.id));
        assert!(!subs.unsubscribe(a.id));

        subs.emit(&1);
        assert!(a.poll_events().is_empty());
    }

    #[test]
    fn test_dropped_receiver_is_pruned() {
        let mut subs = Subscribers::<u32>::default();
        let a = subs.subscribe();
        let _b = subs.subscribe();
        drop(a);

        subs.emit(&1);
        assert_eq!(subs.len(), 1);
    }
}
