//! Observable<T>: a value with synchronous change listeners.
//!
//! Listeners run on the caller's stack, once per actual change, before
//! `set` returns. Setting an equal value is not a change.

pub type ListenerId = u64;

type Listener<T> = Box<dyn FnMut(&T)>;

pub struct Observable<T> {
    value: T,
    listeners: Vec<(ListenerId, Listener<T>)>,
    next_id: ListenerId,
}

impl<T: PartialEq> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and notifies listeners. Returns `false` without
    /// notifying when `value` equals the current one.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        for (_, listener) in &mut self.listeners {
            listener(&self.value);
        }
        true
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&T) + 'static) -> ListenerId {
        let id = self.next_id;
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Does nothing if `id` is not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) {
        self.listeners.retain(|(lid, _)| *lid != id);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
