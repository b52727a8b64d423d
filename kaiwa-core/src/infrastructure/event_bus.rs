use tokio::sync::broadcast;

use crate::modules::chat::domain::ConversationDomainEvent;
use crate::modules::chat::ports::EventPublisher;

/// 进程内事件总线
///
/// 基于 broadcast 通道把已提交的领域事件扇出给订阅者。
/// 无订阅者时事件被丢弃；投递保证由外部系统负责。
pub struct EventBus {
    sender: broadcast::Sender<ConversationDomainEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConversationDomainEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventPublisher for EventBus {
    fn publish(&self, event: ConversationDomainEvent) {
        match serde_json::to_string(&event) {
            Ok(payload) => {
                tracing::debug!(
                    event_type = event.event_type(),
                    conversation_id = %event.conversation_id(),
                    payload = %payload,
                    "[EventBus] Publishing event"
                );
            }
            Err(e) => {
                tracing::warn!("[EventBus] Failed to serialize event payload: {}", e);
            }
        }
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::domain::{Content, Conversation, Owner, UserId};
    use crate::shared::AggregateRoot;

    #[tokio::test]
    async fn test_subscriber_receives_published_events() {
        let bus = EventBus::new();
        let mut receiver = bus.subscribe();

        let mut conversation =
            Conversation::start(Some("Bus".to_string()), Owner::new(UserId::new())).unwrap();
        conversation.add_message(Content::new("hello").unwrap());

        bus.publish_all(conversation.take_events());

        let first = receiver.recv().await.unwrap();
        assert_eq!(first.event_type(), "conversation.started");
        let second = receiver.recv().await.unwrap();
        assert_eq!(second.event_type(), "message.added");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_silent() {
        let bus = EventBus::new();
        let mut conversation = Conversation::start(None, Owner::new(UserId::new())).unwrap();

        // 没有订阅者时发布不报错
        bus.publish_all(conversation.take_events());
    }
}
