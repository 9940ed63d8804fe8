/// Single-slot user-visible error channel

use std::sync::Mutex;

/// One visible message at a time: `report` overwrites the slot, `clear`
/// empties it.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, message: &str);
    fn clear(&self);
}

/// Forwards reports to the `log` facade; for CLI and headless use
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, message: &str) {
        log::error!("{}", message);
    }

    fn clear(&self) {}
}

/// Keeps the slot in memory and remembers every report; test double
pub struct MemoryReporter {
    slot: Mutex<Option<String>>,
    history: Mutex<Vec<String>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        MemoryReporter {
            slot: Mutex::new(None),
            history: Mutex::new(Vec::new()),
        }
    }

    /// The currently displayed message, if any
    pub fn last(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }

    /// Every message ever reported, oldest first (clearing does not erase
    /// the history)
    pub fn reported(&self) -> Vec<String> {
        self.history.lock().unwrap().clone()
    }
}

impl Default for MemoryReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorReporter for MemoryReporter {
    fn report(&self, message: &str) {
        *self.slot.lock().unwrap() = Some(message.to_string());
        self.history.lock().unwrap().push(message.to_string());
    }

    fn clear(&self) {
        *self.slot.lock().unwrap() = None;
    }
}
