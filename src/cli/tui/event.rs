//! Terminal event pump

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};

/// Events delivered to the app loop
#[derive(Debug)]
pub enum Event {
    /// Key press
    Key(KeyEvent),
    /// Terminal was resized; the next draw picks up the new size
    Resize,
    /// No input within the tick interval
    Tick,
}

/// Reads crossterm events on a background thread
///
/// The app loop handles events one at a time, in arrival order.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Starts the reader thread with the given tick interval in milliseconds
    pub fn new(tick_rate_ms: u64) -> Self {
        let tick_rate = Duration::from_millis(tick_rate_ms);
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || loop {
            let event = match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    // Only presses; releases would double every keystroke on Windows
                    Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                        Event::Key(key)
                    }
                    Ok(CrosstermEvent::Resize(_, _)) => Event::Resize,
                    _ => continue,
                },
                Ok(false) => Event::Tick,
                Err(_) => break,
            };

            if tx.send(event).is_err() {
                break;
            }
        });

        Self { rx }
    }

    /// Blocks until the next event
    pub fn next(&self) -> Result<Event> {
        Ok(self.rx.recv()?)
    }
}
