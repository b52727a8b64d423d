use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::{Conversation, ConversationId};
use crate::modules::chat::ports::{ConversationRepository, EventPublisher};
use crate::shared::AggregateRoot;

/// 重命名会话命令
#[derive(Debug, Clone)]
pub struct RenameConversationCommand {
    pub conversation_id: ConversationId,
    pub title: String,
}

impl RenameConversationCommand {
    pub fn new(conversation_id: ConversationId, title: impl Into<String>) -> Self {
        Self {
            conversation_id,
            title: title.into(),
        }
    }
}

/// 重命名会话响应
#[derive(Debug, Clone)]
pub struct RenameConversationResponse {
    pub conversation: Conversation,
}

/// 重命名会话命令处理器
pub struct RenameConversationHandler {
    conversation_repository: Arc<dyn ConversationRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RenameConversationHandler {
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
impl CommandHandler<RenameConversationCommand, RenameConversationResponse>
    for RenameConversationHandler
{
    async fn handle(
        &self,
        command: RenameConversationCommand,
    ) -> Result<RenameConversationResponse, ApplicationError> {
        let mut conversation = self
            .conversation_repository
            .get(command.conversation_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::ConversationNotFound(command.conversation_id.to_string())
            })?;

        conversation.rename(command.title)?;

        let events = conversation.take_events();
        self.conversation_repository.save(&conversation).await?;
        self.event_publisher.publish_all(events);

        Ok(RenameConversationResponse { conversation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::EventBus;
    use crate::modules::chat::domain::{Owner, UserId};
    use crate::modules::chat::infrastructure::InMemoryConversationRepository;

    #[tokio::test]
    async fn test_rename_conversation() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        let bus = Arc::new(EventBus::new());
        let handler = RenameConversationHandler::new(repo.clone(), bus.clone());

        let mut conversation =
            Conversation::start(Some("Old".to_string()), Owner::new(UserId::new())).unwrap();
        conversation.take_events();
        repo.save(&conversation).await.unwrap();

        let mut receiver = bus.subscribe();
        let command = RenameConversationCommand::new(conversation.id(), "New");
        let response = handler.handle(command).await.unwrap();

        assert_eq!(response.conversation.title(), "New");
        let event = receiver.recv().await.unwrap();
        assert_eq!(event.event_type(), "conversation.renamed");
    }

    #[tokio::test]
    async fn test_rename_missing_conversation_fails() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        let bus = Arc::new(EventBus::new());
        let handler = RenameConversationHandler::new(repo, bus);

        let command = RenameConversationCommand::new(ConversationId::new(), "New");
        let result = handler.handle(command).await;

        assert!(matches!(
            result,
            Err(ApplicationError::ConversationNotFound(_))
        ));
    }
}
