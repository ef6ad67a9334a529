// src/notifier.rs
use std::fmt;

/// Callback invoked after a successful store mutation. Callbacks take no
/// arguments; interested parties re-read the store to refresh their view.
pub type ChangeCallback = Box<dyn FnMut()>;

/// Owned publish/subscribe list for store change events. Subscribers run in
/// registration order, once per notification.
#[derive(Default)]
pub struct ChangeNotifier {
    subscribers: Vec<ChangeCallback>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        ChangeNotifier::default()
    }

    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut() + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    pub fn notify(&mut self) {
        log::debug!("Notifying {} change subscriber(s)", self.subscribers.len());
        for callback in &mut self.subscribers {
            callback();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
