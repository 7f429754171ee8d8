use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use log::trace;

pub type Callback<T> = Rc<dyn Fn(&T)>;
pub type SubscriptionId = u64;

/// Single-threaded fan-out channel. Emitting runs every listener to completion
/// before returning.
pub struct Channel<T: std::fmt::Debug> {
    listeners: Rc<RefCell<HashMap<SubscriptionId, Callback<T>>>>,
    next_id: Rc<Cell<SubscriptionId>>,
}

impl<T: std::fmt::Debug> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            listeners: Rc::clone(&self.listeners),
            next_id: Rc::clone(&self.next_id),
        }
    }
}

pub struct EventEmitter<T: std::fmt::Debug> {
    channel: Channel<T>,
}

impl<T: std::fmt::Debug> Clone for EventEmitter<T> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
        }
    }
}

pub struct EventObserver<T: std::fmt::Debug> {
    channel: Channel<T>,
}

impl<T: std::fmt::Debug> Clone for EventObserver<T> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
        }
    }
}

/// Handle returned by [`EventObserver::subscribe`]; consuming it removes the listener.
pub struct Unsubscriber<T: std::fmt::Debug> {
    channel: Channel<T>,
    id: SubscriptionId,
}

impl<T: std::fmt::Debug> Unsubscriber<T> {
    pub fn unsubscribe(self) -> bool {
        self.channel.unsubscribe(self.id)
    }
}

impl<T: std::fmt::Debug> Channel<T> {
    pub fn new() -> (EventEmitter<T>, EventObserver<T>) {
        let channel = Channel {
            listeners: Rc::new(RefCell::new(HashMap::new())),
            next_id: Rc::new(Cell::new(0)),
        };
        (
            EventEmitter {
                channel: channel.clone(),
            },
            EventObserver { channel },
        )
    }

    fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&T) + 'static,
    {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().insert(id, Rc::new(callback));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.borrow_mut().remove(&id).is_some()
    }

    fn emit(&self, data: &T) {
        // Snapshot so listeners may subscribe or unsubscribe while running.
        let listeners: Vec<Callback<T>> = {
            let mut entries: Vec<_> = self
                .listeners
                .borrow()
                .iter()
                .map(|(id, cb)| (*id, cb.clone()))
                .collect();
            entries.sort_by_key(|(id, _)| *id);
            entries.into_iter().map(|(_, cb)| cb).collect()
        };
        trace!(target: "events", "Emitting event to {} listeners: {:?}", listeners.len(), data);
        for listener in listeners {
            listener(data);
        }
    }
}

impl<T: std::fmt::Debug> EventEmitter<T> {
    pub fn emit(&self, data: &T) {
        self.channel.emit(data);
    }

    pub fn emit_owned(&self, data: T) {
        self.channel.emit(&data);
    }
}

impl<T: std::fmt::Debug> EventObserver<T> {
    pub fn subscribe<F>(&self, callback: F) -> Unsubscriber<T>
    where
        F: Fn(&T) + 'static,
    {
        let id = self.channel.subscribe(callback);
        Unsubscriber {
            channel: self.channel.clone(),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GameActionEvent;
    use std::cell::RefCell;

    #[test]
    fn test_listeners_run_in_subscription_order() {
        let (emitter, observer) = Channel::<GameActionEvent>::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second"] {
            let seen = seen.clone();
            observer.subscribe(move |event: &GameActionEvent| {
                seen.borrow_mut().push(format!("{tag}:{event:?}"));
            });
        }

        emitter.emit(&GameActionEvent::RequestHint);
        assert_eq!(
            *seen.borrow(),
            vec!["first:RequestHint".to_string(), "second:RequestHint".to_string()]
        );
    }

    #[test]
    fn test_clone_and_share() {
        let (emitter1, observer1) = Channel::<GameActionEvent>::new();
        let emitter2 = emitter1.clone();
        let observer2 = observer1.clone();

        let counter = Rc::new(Cell::new(0));
        let counter_clone = counter.clone();
        observer1.subscribe(move |_| counter_clone.set(counter_clone.get() + 1));

        emitter2.emit(&GameActionEvent::Restart);
        assert_eq!(counter.get(), 1);

        let counter_clone = counter.clone();
        observer2.subscribe(move |_| counter_clone.set(counter_clone.get() + 1));

        emitter1.emit_owned(GameActionEvent::SubmitGuess);
        assert_eq!(counter.get(), 3);
    }

    #[test]
    fn test_unsubscribe() {
        let (emitter, observer) = Channel::<GameActionEvent>::new();
        let counter = Rc::new(Cell::new(0));
        let counter_clone = counter.clone();

        let subscription = observer.subscribe(move |_| counter_clone.set(counter_clone.get() + 1));

        emitter.emit(&GameActionEvent::Restart);
        assert_eq!(counter.get(), 1);

        assert!(subscription.unsubscribe());
        emitter.emit(&GameActionEvent::Restart);
        assert_eq!(counter.get(), 1);
    }
}
