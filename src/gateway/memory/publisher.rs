use std::collections::VecDeque;
use std::sync::Arc;
use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

const DEFAULT_CAPACITY: usize = 1024;

// MemoryPublisher keeps the most recent published events, dropping the
// oldest once capacity is reached; clones share the same buffer.
#[derive(Debug, Clone)]
pub struct MemoryPublisher {
    capacity: usize,
    events: Arc<RwLock<VecDeque<DomainEvent>>>,
}

impl MemoryPublisher {
    pub(crate) fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            events: Arc::new(RwLock::new(VecDeque::new())),
        }
    }

    pub async fn events(&self) -> Vec<DomainEvent> {
        self.events.read().await.iter().cloned().collect()
    }
}

#[async_trait]
impl EventPublisher for MemoryPublisher {
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        let mut events = self.events.write().await;
        if events.len() == self.capacity {
            let _ = events.pop_front();
        }
        events.push_back(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::{DomainEvent, DomainEventType};
    use crate::gateway::events::EventPublisher;
    use crate::gateway::memory::publisher::MemoryPublisher;

    #[tokio::test]
    async fn test_should_publish_to_memory() {
        let publisher = MemoryPublisher::new();
        let observer = publisher.clone();
        let event = DomainEvent::deleted("books", "catalog", &HashMap::new(), 3).expect("build event");
        let _ = publisher.publish(&event).await.expect("should publish");
        let events = observer.events().await;
        assert_eq!(1, events.len());
        assert_eq!(DomainEventType::Deleted, events[0].kind);
        assert_eq!(event, events[0]);
    }

    #[tokio::test]
    async fn test_should_drop_oldest_events_past_capacity() {
        let publisher = MemoryPublisher::with_capacity(2);
        for id in 1..=3 {
            let event = DomainEvent::deleted("books", "catalog", &HashMap::new(), id).expect("build event");
            let _ = publisher.publish(&event).await.expect("should publish");
        }
        let keys: Vec<String> = publisher.events().await.iter().map(|e| e.key.clone()).collect();
        assert_eq!(vec!["2".to_string(), "3".to_string()], keys);
    }
}
