use super::{DisplayRegion, LoadingIndicator};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionEvent {
    Cleared,
    Message(String),
    Error(String),
}

/// Display region that records everything rendered into it.
#[derive(Clone)]
pub struct RecordingRegion {
    events: Arc<Mutex<Vec<RegionEvent>>>,
}

impl RecordingRegion {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn events(&self) -> Vec<RegionEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                RegionEvent::Message(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                RegionEvent::Error(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    /// True if any rendered message or error contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.events().iter().any(|event| match event {
            RegionEvent::Message(text) | RegionEvent::Error(text) => text.contains(needle),
            RegionEvent::Cleared => false,
        })
    }
}

impl Default for RecordingRegion {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayRegion for RecordingRegion {
    fn clear(&self) {
        self.events.lock().unwrap().push(RegionEvent::Cleared);
    }

    fn show_message(&self, text: &str) {
        self.events
            .lock()
            .unwrap()
            .push(RegionEvent::Message(text.to_string()));
    }

    fn show_error(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(RegionEvent::Error(message.to_string()));
    }
}

/// Indicator that counts visibility toggles.
#[derive(Clone)]
pub struct MockIndicator {
    show_count: Arc<Mutex<usize>>,
    hide_count: Arc<Mutex<usize>>,
}

impl MockIndicator {
    pub fn new() -> Self {
        Self {
            show_count: Arc::new(Mutex::new(0)),
            hide_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn get_show_count(&self) -> usize {
        *self.show_count.lock().unwrap()
    }

    pub fn get_hide_count(&self) -> usize {
        *self.hide_count.lock().unwrap()
    }

    /// True while shown more times than hidden.
    pub fn is_visible(&self) -> bool {
        self.get_show_count() > self.get_hide_count()
    }
}

impl Default for MockIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadingIndicator for MockIndicator {
    fn show(&self) {
        *self.show_count.lock().unwrap() += 1;
    }

    fn hide(&self) {
        *self.hide_count.lock().unwrap() += 1;
    }
}
