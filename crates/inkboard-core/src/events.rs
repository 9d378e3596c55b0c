//! Board notifications and their fan-out.
//!
//! Subscribers hold the receiving end of an `mpsc` channel; the board keeps
//! the senders and drops any whose receiver has gone away.

use crate::shapes::ShapeId;
use crate::tools::ToolKind;
use kurbo::Point;
use std::sync::mpsc::{Receiver, Sender, channel};

/// Something observable happened on the board.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    /// A shape was committed to the store.
    ShapeAdded { id: ShapeId },
    /// A shape was removed from the store.
    ShapeRemoved { id: ShapeId },
    /// The select tool picked a shape.
    ShapeSelected { id: ShapeId, point: Point },
    /// The select tool released its selection.
    ShapeDeselected { id: ShapeId },
    /// A drag finished; positions are the shape's anchor before and after.
    ShapeMoved { id: ShapeId, from: Point, to: Point },
    /// Every shape was removed.
    Cleared,
    /// The active tool changed (`None` when deactivated).
    ToolChanged { tool: Option<ToolKind> },
}

/// Fan-out of [`BoardEvent`]s to any number of subscribers.
#[derive(Debug, Default)]
pub struct EventBus {
    subscribers: Vec<Sender<BoardEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber. Events published from now on are delivered
    /// to the returned receiver in publication order.
    pub fn subscribe(&mut self) -> Receiver<BoardEvent> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver an event to every live subscriber.
    pub fn publish(&mut self, event: BoardEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn publish_all(&mut self, events: impl IntoIterator<Item = BoardEvent>) {
        for event in events {
            self.publish(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_reaches_all_subscribers() {
        let mut bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();
        bus.publish(BoardEvent::Cleared);
        assert_eq!(a.try_recv().ok(), Some(BoardEvent::Cleared));
        assert_eq!(b.try_recv().ok(), Some(BoardEvent::Cleared));
    }

    #[test]
    fn test_dropped_receivers_are_pruned() {
        let mut bus = EventBus::new();
        let kept = bus.subscribe();
        drop(bus.subscribe());
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(BoardEvent::Cleared);
        assert_eq!(bus.subscriber_count(), 1);
        assert!(kept.try_recv().is_ok());
    }

    #[test]
    fn test_events_arrive_in_order() {
        let mut bus = EventBus::new();
        let rx = bus.subscribe();
        bus.publish_all([
            BoardEvent::ShapeAdded { id: "a".to_string() },
            BoardEvent::ShapeRemoved { id: "a".to_string() },
        ]);
        let received: Vec<BoardEvent> = rx.try_iter().collect();
        assert_eq!(
            received,
            vec![
                BoardEvent::ShapeAdded { id: "a".to_string() },
                BoardEvent::ShapeRemoved { id: "a".to_string() },
            ]
        );
    }
}
