use std::collections::VecDeque;

use parking_lot::Mutex;

use super::{CanvasEvent, EventHandler};

/// Broadcasts canvas events to registered handlers
pub struct EventBus {
    handlers: Mutex<Vec<Box<dyn EventHandler>>>,
    pending: Mutex<VecDeque<CanvasEvent>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers = match self.handlers.try_lock() {
            Some(handlers) => format!("<{} handlers>", handlers.len()),
            None => "<dispatching>".to_owned(),
        };
        f.debug_struct("EventBus").field("handlers", &handlers).finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
            pending: Mutex::new(VecDeque::new()),
        }
    }

    /// Subscribe a handler to receive events.
    ///
    /// Calling this from inside `handle_event` deadlocks.
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.lock().push(handler);
    }

    /// Emit an event to all registered handlers.
    ///
    /// Events are queued and delivered in order by whichever caller currently
    /// holds the handlers. An emit from inside `handle_event`, or from another
    /// thread while a dispatch is running, only queues its event and returns.
    pub fn emit(&self, event: CanvasEvent) {
        self.pending.lock().push_back(event);

        loop {
            {
                let Some(mut handlers) = self.handlers.try_lock() else {
                    return;
                };
                loop {
                    // Released before handlers run so they can queue more
                    let next = self.pending.lock().pop_front();
                    let Some(event) = next else { break };
                    for handler in handlers.iter_mut() {
                        handler.handle_event(&event);
                    }
                }
            }
            // Another thread may have queued after the drain but before the
            // handlers were released
            if self.pending.lock().is_empty() {
                return;
            }
        }
    }
}
