//! Subscriber registry keyed by opaque handles.
//!
//! Slots are reused after unsubscription; invocation skips empty slots.

use std::fmt;

/// Handle returned by [`EventRegistry::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventHandle(usize);

type Handler<E> = Box<dyn FnMut(&E)>;

pub struct EventRegistry<E> {
    slots: Vec<Option<Handler<E>>>,
}

impl<E> EventRegistry<E> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Register `handler`, reusing the first free slot
    pub fn subscribe(&mut self, handler: impl FnMut(&E) + 'static) -> EventHandle {
        let handler: Handler<E> = Box::new(handler);
        match self.slots.iter().position(Option::is_none) {
            Some(i) => {
                self.slots[i] = Some(handler);
                EventHandle(i)
            }
            None => {
                self.slots.push(Some(handler));
                EventHandle(self.slots.len() - 1)
            }
        }
    }

    /// Release a slot. Returns false if it was already empty.
    pub fn unsubscribe(&mut self, handle: EventHandle) -> bool {
        match self.slots.get_mut(handle.0) {
            Some(slot) => slot.take().is_some(),
            None => false,
        }
    }

    pub fn invoke(&mut self, event: &E) {
        for handler in self.slots.iter_mut().flatten() {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E> Default for EventRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for EventRegistry<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRegistry")
            .field("slots", &self.slots.len())
            .field("subscribers", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_invoke_reaches_all_subscribers() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = EventRegistry::new();

        let a = Rc::clone(&seen);
        registry.subscribe(move |v: &u32| a.borrow_mut().push(("a", *v)));
        let b = Rc::clone(&seen);
        registry.subscribe(move |v: &u32| b.borrow_mut().push(("b", *v)));

        registry.invoke(&7);
        assert_eq!(*seen.borrow(), vec![("a", 7), ("b", 7)]);
    }

    #[test]
    fn test_unsubscribe_clears_and_reuses_slot() {
        let count = Rc::new(RefCell::new(0));
        let mut registry = EventRegistry::new();

        let c = Rc::clone(&count);
        let first = registry.subscribe(move |_: &()| *c.borrow_mut() += 1);
        let c = Rc::clone(&count);
        let second = registry.subscribe(move |_: &()| *c.borrow_mut() += 10);

        assert!(registry.unsubscribe(first));
        assert!(!registry.unsubscribe(first));
        registry.invoke(&());
        assert_eq!(*count.borrow(), 10);

        let c = Rc::clone(&count);
        let third = registry.subscribe(move |_: &()| *c.borrow_mut() += 100);
        assert_eq!(third, first);
        assert_ne!(third, second);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unknown_handle_is_ignored() {
        let mut registry: EventRegistry<()> = EventRegistry::new();
        assert!(!registry.unsubscribe(EventHandle(3)));
        assert!(registry.is_empty());
    }
}
