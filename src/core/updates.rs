//! Broadcast channel for post list snapshots.
//!
//! Subscribers only see snapshots published after they subscribed. A
//! subscriber that falls more than `capacity` snapshots behind skips the
//! oldest ones and resumes with the newest still buffered.

use crate::config::MAX_UPDATES_CAPACITY;
use crate::domain::model::PostListState;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};

pub(crate) struct PostListBroadcaster {
    tx: broadcast::Sender<PostListState>,
}

impl PostListBroadcaster {
    /// `capacity` is clamped to `1..=MAX_UPDATES_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.clamp(1, MAX_UPDATES_CAPACITY));
        Self { tx }
    }

    /// Returns the number of subscribers that received the snapshot.
    pub fn publish(&self, state: PostListState) -> usize {
        // No subscribers is fine, the snapshot is simply dropped
        self.tx.send(state).unwrap_or(0)
    }

    pub fn subscribe(&self) -> PostListUpdates {
        PostListUpdates {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Stream of [`PostListState`] snapshots from one `PostsService`.
pub struct PostListUpdates {
    rx: broadcast::Receiver<PostListState>,
}

impl PostListUpdates {
    /// Waits for the next snapshot. Returns `None` once the service is dropped.
    pub async fn next(&mut self) -> Option<PostListState> {
        loop {
            match self.rx.recv().await {
                Ok(state) => return Some(state),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Post list subscriber lagged, skipped {} updates", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Returns an already published snapshot without waiting.
    pub fn try_next(&mut self) -> Option<PostListState> {
        loop {
            match self.rx.try_recv() {
                Ok(state) => return Some(state),
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::warn!("Post list subscriber lagged, skipped {} updates", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Post;
    use std::sync::Arc;

    fn state(count: u64) -> PostListState {
        let posts: Vec<Post> = (0..count)
            .map(|i| Post {
                id: i.to_string(),
                title: format!("Post {}", i),
                content: String::new(),
                image_path: String::new(),
                creator: None,
            })
            .collect();
        PostListState {
            posts: Arc::from(posts),
            post_count: count,
        }
    }

    #[test]
    fn publish_without_subscribers_is_dropped() {
        let broadcaster = PostListBroadcaster::new(4);
        assert_eq!(broadcaster.publish(state(1)), 0);

        let mut late = broadcaster.subscribe();
        assert!(late.try_next().is_none());
    }

    #[test]
    fn late_subscriber_only_sees_future_snapshots() {
        let broadcaster = PostListBroadcaster::new(4);
        let mut early = broadcaster.subscribe();
        broadcaster.publish(state(1));

        let mut late = broadcaster.subscribe();
        assert_eq!(broadcaster.subscriber_count(), 2);
        broadcaster.publish(state(2));

        assert_eq!(early.try_next().unwrap().post_count, 1);
        assert_eq!(early.try_next().unwrap().post_count, 2);
        assert_eq!(late.try_next().unwrap().post_count, 2);
        assert!(late.try_next().is_none());
    }

    #[test]
    fn lagging_subscriber_skips_to_buffered_snapshots() {
        let broadcaster = PostListBroadcaster::new(2);
        let mut updates = broadcaster.subscribe();
        for count in 1..=5 {
            broadcaster.publish(state(count));
        }

        assert_eq!(updates.try_next().unwrap().post_count, 4);
        assert_eq!(updates.try_next().unwrap().post_count, 5);
        assert!(updates.try_next().is_none());
    }

    #[test]
    fn out_of_range_capacity_is_clamped() {
        let broadcaster = PostListBroadcaster::new(usize::MAX);
        let mut updates = broadcaster.subscribe();
        broadcaster.publish(state(1));
        assert_eq!(updates.try_next().unwrap().post_count, 1);

        let broadcaster = PostListBroadcaster::new(0);
        let mut updates = broadcaster.subscribe();
        broadcaster.publish(state(2));
        assert_eq!(updates.try_next().unwrap().post_count, 2);
    }

    #[tokio::test]
    async fn next_ends_when_broadcaster_is_dropped() {
        let broadcaster = PostListBroadcaster::new(2);
        let mut updates = broadcaster.subscribe();
        broadcaster.publish(state(3));
        drop(broadcaster);

        assert_eq!(updates.next().await.unwrap().post_count, 3);
        assert!(updates.next().await.is_none());
    }
}
