//! Result display and loading feedback
//!
//! Each operation renders into its own display region and toggles its own
//! loading indicator around the request lifetime.

pub mod console;
pub mod mock;

pub use console::{ConsoleIndicator, ConsoleRegion};
pub use mock::{MockIndicator, RecordingRegion};

/// Output sink for one operation's results.
pub trait DisplayRegion: Send + Sync {
    /// Discard whatever the previous submission rendered.
    fn clear(&self);
    fn show_message(&self, text: &str);
    fn show_error(&self, message: &str);
}

/// Progress cue shown for the duration of one request.
pub trait LoadingIndicator: Send + Sync {
    fn show(&self);
    fn hide(&self);
}
