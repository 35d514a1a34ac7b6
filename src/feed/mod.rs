//! Fetch orchestration between the store and the TUI.
//!
//! The TUI loop never awaits the store directly. It polls a [`StatusFeed`]
//! for [`FetchEvent`]s and asks it for refreshes. Two feeds are provided:
//!
//! - [`Refresher`] runs fetches against a [`StatusStore`](crate::StatusStore)
//!   on a background task, on request and on a fixed interval.
//! - [`ChannelFeed`] receives events pushed by the caller, for embedding and
//!   for driving the app from tests.

mod channel;
mod refresher;

pub use channel::{ChannelFeed, FeedHandle};
pub use refresher::{RefreshOptions, Refresher};

use std::fmt::Debug;

use crate::data::StatusData;
use crate::store::StoreError;

/// Progress of one fetch cycle.
#[derive(Debug, Clone)]
pub enum FetchEvent {
    /// A fetch began.
    Started,
    /// A fetch completed.
    Finished(Result<StatusData, StoreError>),
}

/// Source of fetch events for the application.
///
/// # Example
///
/// ```
/// use status_sentinel::{ChannelFeed, FetchEvent, StatusFeed};
///
/// let (handle, mut feed) = ChannelFeed::create("example");
/// handle.send(FetchEvent::Started);
/// assert!(matches!(feed.poll(), Some(FetchEvent::Started)));
/// ```
pub trait StatusFeed: Send + Debug {
    /// Take the next pending event, if any.
    ///
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<FetchEvent>;

    /// Ask for a fetch as soon as possible.
    fn request_refresh(&mut self);

    /// Returns a human-readable description of the feed.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}
