//! Event bus for modboard using tokio::broadcast
//!
//! Published after each metrics mutation so a presentation layer can redraw.

use tokio::sync::broadcast;

/// Events emitted when session metrics change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricsEvent {
    /// A file analysis was recorded (file name, issue count)
    AnalysisRecorded { file: String, issues: u64 },
    /// A fix was recorded for a pattern
    FixRecorded { feature_id: String },
    /// Pattern occurrences were added
    FeatureUsageRecorded { feature_id: String, count: u64 },
    /// Session was reset to zero
    Reset,
}

/// Event bus for broadcasting metrics events
pub struct EventBus {
    sender: broadcast::Sender<MetricsEvent>,
}

impl EventBus {
    /// Create a new event bus with specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Create with default capacity (128 events)
    pub fn default_capacity() -> Self {
        Self::new(128)
    }

    /// Publish an event to all subscribers
    pub fn publish(&self, event: MetricsEvent) {
        // No subscribers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MetricsEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::default_capacity()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_subscribe_in_order() {
        let bus = EventBus::default_capacity();
        let mut rx = bus.subscribe();

        bus.publish(MetricsEvent::AnalysisRecorded {
            file: "a.js".to_string(),
            issues: 4,
        });
        bus.publish(MetricsEvent::FixRecorded {
            feature_id: "var".to_string(),
        });

        let first = rx.recv().await.unwrap();
        assert!(matches!(first, MetricsEvent::AnalysisRecorded { issues: 4, .. }));

        let second = rx.recv().await.unwrap();
        assert_eq!(
            second,
            MetricsEvent::FixRecorded {
                feature_id: "var".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_clones_share_channel() {
        let bus = EventBus::default_capacity();
        let other = bus.clone();
        let mut rx = bus.subscribe();

        assert_eq!(other.subscriber_count(), 1);
        other.publish(MetricsEvent::Reset);

        assert_eq!(rx.recv().await.unwrap(), MetricsEvent::Reset);
    }

    #[test]
    fn test_no_subscribers_ok() {
        let bus = EventBus::default_capacity();
        bus.publish(MetricsEvent::Reset);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
