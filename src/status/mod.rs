//! Status/progress reporting
//!
//! The status feed is the end user's view of what the session is doing:
//! every controller transition that can succeed or fail lands here as a
//! short, severity-tagged message. Progress tracks the current question.

mod feed;
mod progress;

pub use feed::{Severity, StatusEntry, StatusFeed, FEED_CAPACITY};
pub use progress::Progress;
