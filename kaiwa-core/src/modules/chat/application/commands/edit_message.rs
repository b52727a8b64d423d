use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::{Content, ConversationId, MessageId};
use crate::modules::chat::ports::{ConversationRepository, EventPublisher};
use crate::shared::AggregateRoot;

/// 编辑消息命令
#[derive(Debug, Clone)]
pub struct EditMessageCommand {
    pub conversation_id: ConversationId,
    pub message_id: MessageId,
    /// 新的内容文本
    pub content: String,
}

impl EditMessageCommand {
    pub fn new(
        conversation_id: ConversationId,
        message_id: MessageId,
        content: impl Into<String>,
    ) -> Self {
        Self {
            conversation_id,
            message_id,
            content: content.into(),
        }
    }
}

/// 编辑消息响应
#[derive(Debug, Clone)]
pub struct EditMessageResponse {
    pub content: Content,
}

/// 编辑消息命令处理器
pub struct EditMessageHandler {
    conversation_repository: Arc<dyn ConversationRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl EditMessageHandler {
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
impl CommandHandler<EditMessageCommand, EditMessageResponse> for EditMessageHandler {
    async fn handle(
        &self,
        command: EditMessageCommand,
    ) -> Result<EditMessageResponse, ApplicationError> {
        let mut conversation = self
            .conversation_repository
            .get(command.conversation_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::ConversationNotFound(command.conversation_id.to_string())
            })?;

        let content = Content::new(command.content)?;
        let content = conversation.edit_message(command.message_id, content)?;

        let events = conversation.take_events();
        self.conversation_repository.save(&conversation).await?;
        self.event_publisher.publish_all(events);

        Ok(EditMessageResponse { content })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::EventBus;
    use crate::modules::chat::domain::{Conversation, Owner, UserId};
    use crate::modules::chat::infrastructure::InMemoryConversationRepository;
    use crate::shared::DomainError;

    #[tokio::test]
    async fn test_edit_message_persists_revision() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        let bus = Arc::new(EventBus::new());
        let handler = EditMessageHandler::new(repo.clone(), bus.clone());

        let mut conversation = Conversation::start(None, Owner::new(UserId::new())).unwrap();
        let message = conversation.add_message(Content::new("草稿").unwrap());
        conversation.take_events();
        repo.save(&conversation).await.unwrap();

        let mut receiver = bus.subscribe();
        let response = handler
            .handle(EditMessageCommand::new(
                conversation.id(),
                message.id(),
                "定稿",
            ))
            .await
            .unwrap();

        assert_eq!(response.content.text(), "定稿");

        let stored = repo.get(conversation.id()).await.unwrap().unwrap();
        assert_eq!(stored.messages()[0].content().text(), "定稿");
        assert_eq!(stored.messages()[0].revisions()[0].text(), "草稿");

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.event_type(), "message.edited");
    }

    #[tokio::test]
    async fn test_edit_unknown_message_publishes_nothing() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        let bus = Arc::new(EventBus::new());
        let handler = EditMessageHandler::new(repo.clone(), bus.clone());

        let mut conversation = Conversation::start(None, Owner::new(UserId::new())).unwrap();
        conversation.take_events();
        repo.save(&conversation).await.unwrap();

        let mut receiver = bus.subscribe();
        let result = handler
            .handle(EditMessageCommand::new(
                conversation.id(),
                MessageId::new(),
                "x",
            ))
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::DomainError(DomainError::NotFound { .. }))
        ));
        assert!(matches!(
            receiver.try_recv(),
            Err(tokio::sync::broadcast::error::TryRecvError::Empty)
        ));
    }
}
