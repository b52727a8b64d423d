use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::{ConversationId, Message, MessageId};
use crate::modules::chat::ports::{ConversationRepository, EventPublisher};
use crate::shared::AggregateRoot;

/// 置顶消息命令
#[derive(Debug, Clone)]
pub struct PinMessageCommand {
    pub conversation_id: ConversationId,
    pub message_id: MessageId,
}

impl PinMessageCommand {
    pub fn new(conversation_id: ConversationId, message_id: MessageId) -> Self {
        Self {
            conversation_id,
            message_id,
        }
    }
}

/// 置顶消息响应
#[derive(Debug, Clone)]
pub struct PinMessageResponse {
    pub message: Message,
}

/// 置顶消息命令处理器
pub struct PinMessageHandler {
    conversation_repository: Arc<dyn ConversationRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl PinMessageHandler {
    pub fn new(
        conversation_repository: Arc<dyn ConversationRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            conversation_repository,
            event_publisher,
        }
    }
}

#[async_trait]
impl CommandHandler<PinMessageCommand, PinMessageResponse> for PinMessageHandler {
    async fn handle(
        &self,
        command: PinMessageCommand,
    ) -> Result<PinMessageResponse, ApplicationError> {
        let mut conversation = self
            .conversation_repository
            .get(command.conversation_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::ConversationNotFound(command.conversation_id.to_string())
            })?;

        let message = conversation.pin_message(command.message_id)?;

        let events = conversation.take_events();
        self.conversation_repository.save(&conversation).await?;
        self.event_publisher.publish_all(events);

        Ok(PinMessageResponse { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::EventBus;
    use crate::modules::chat::domain::{Content, Conversation, Owner, UserId};
    use crate::modules::chat::infrastructure::InMemoryConversationRepository;
    use crate::shared::DomainError;

    #[tokio::test]
    async fn test_pin_message() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        let bus = Arc::new(EventBus::new());
        let handler = PinMessageHandler::new(repo.clone(), bus.clone());

        let mut conversation = Conversation::start(None, Owner::new(UserId::new())).unwrap();
        let message = conversation.add_message(Content::new("重要结论").unwrap());
        conversation.take_events();
        repo.save(&conversation).await.unwrap();

        let mut receiver = bus.subscribe();
        let response = handler
            .handle(PinMessageCommand::new(conversation.id(), message.id()))
            .await
            .unwrap();

        assert!(response.message.is_pinned());

        let stored = repo.get(conversation.id()).await.unwrap().unwrap();
        assert!(stored.messages()[0].is_pinned());

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.event_type(), "message.pinned");
    }

    #[tokio::test]
    async fn test_pin_unknown_message_fails() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        let bus = Arc::new(EventBus::new());
        let handler = PinMessageHandler::new(repo.clone(), bus);

        let mut conversation = Conversation::start(None, Owner::new(UserId::new())).unwrap();
        conversation.take_events();
        repo.save(&conversation).await.unwrap();

        let result = handler
            .handle(PinMessageCommand::new(conversation.id(), MessageId::new()))
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::DomainError(DomainError::NotFound { .. }))
        ));
    }
}
