//! Channel-based feed.
//!
//! Receives fetch events pushed by the caller instead of running fetches
//! itself. Refresh requests are forwarded back through the handle.

use tokio::sync::mpsc;

use super::{FetchEvent, StatusFeed};

/// The producer side of a [`ChannelFeed`].
#[derive(Debug)]
pub struct FeedHandle {
    events: mpsc::UnboundedSender<FetchEvent>,
    refreshes: mpsc::UnboundedReceiver<()>,
}

impl FeedHandle {
    /// Push an event to the feed. Returns false if the feed was dropped.
    pub fn send(&self, event: FetchEvent) -> bool {
        self.events.send(event).is_ok()
    }

    /// Number of refresh requests received since the last call.
    pub fn drain_refresh_requests(&mut self) -> usize {
        let mut count = 0;
        while self.refreshes.try_recv().is_ok() {
            count += 1;
        }
        count
    }
}

/// A feed that receives events through a channel.
#[derive(Debug)]
pub struct ChannelFeed {
    events: mpsc::UnboundedReceiver<FetchEvent>,
    refreshes: mpsc::UnboundedSender<()>,
    description: String,
}

impl ChannelFeed {
    /// Create a connected handle and feed.
    pub fn create(source_description: &str) -> (FeedHandle, Self) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (refresh_tx, refresh_rx) = mpsc::unbounded_channel();

        let handle = FeedHandle {
            events: event_tx,
            refreshes: refresh_rx,
        };
        let feed = Self {
            events: event_rx,
            refreshes: refresh_tx,
            description: format!("channel: {}", source_description),
        };
        (handle, feed)
    }
}

impl StatusFeed for ChannelFeed {
    fn poll(&mut self) -> Option<FetchEvent> {
        self.events.try_recv().ok()
    }

    fn request_refresh(&mut self) {
        // A dropped handle just means nobody is listening for refreshes
        let _ = self.refreshes.send(());
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{StatusData, StatusStatistics};
    use crate::store::StoreError;

    #[test]
    fn test_channel_feed_poll() {
        let (handle, mut feed) = ChannelFeed::create("test");
        assert_eq!(feed.description(), "channel: test");
        assert!(feed.poll().is_none());

        handle.send(FetchEvent::Started);
        handle.send(FetchEvent::Finished(Ok(StatusData {
            entries: Vec::new(),
            statistics: StatusStatistics::default(),
            targets: Vec::new(),
        })));
        handle.send(FetchEvent::Finished(Err(StoreError::unavailable("boom"))));

        assert!(matches!(feed.poll(), Some(FetchEvent::Started)));
        assert!(matches!(feed.poll(), Some(FetchEvent::Finished(Ok(_)))));
        assert!(matches!(feed.poll(), Some(FetchEvent::Finished(Err(_)))));
        assert!(feed.poll().is_none());
    }

    #[test]
    fn test_refresh_requests_reach_handle() {
        let (mut handle, mut feed) = ChannelFeed::create("test");
        feed.request_refresh();
        feed.request_refresh();
        assert_eq!(handle.drain_refresh_requests(), 2);
        assert_eq!(handle.drain_refresh_requests(), 0);
    }

    #[test]
    fn test_send_after_feed_dropped() {
        let (handle, feed) = ChannelFeed::create("test");
        drop(feed);
        assert!(!handle.send(FetchEvent::Started));
    }
}
