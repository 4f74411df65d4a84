mod bus;
mod events;
mod handlers;

pub use bus::EventBus;
pub use events::CanvasEvent;
pub use handlers::RepaintHandler;

pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &CanvasEvent);
}
