use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::{Content, Conversation, ConversationId, Message};
use crate::modules::chat::ports::{ConversationRepository, EventPublisher};
use crate::shared::AggregateRoot;

/// 发布消息命令
#[derive(Debug, Clone)]
pub struct PostMessageCommand {
    pub conversation_id: ConversationId,
    /// 消息内容文本
    pub content: String,
}

impl PostMessageCommand {
    pub fn new(conversation_id: ConversationId, content: impl Into<String>) -> Self {
        Self {
            conversation_id,
            content: content.into(),
        }
    }
}

/// 发布消息响应
#[derive(Debug, Clone)]
pub struct PostMessageResponse {
    pub message: Message,
}

/// 发布消息命令处理器
pub struct PostMessageHandler {
    conversation_repository: Arc<dyn ConversationRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl PostMessageHandler {
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
impl CommandHandler<PostMessageCommand, PostMessageResponse> for PostMessageHandler {
    async fn handle(
        &self,
        command: PostMessageCommand,
    ) -> Result<PostMessageResponse, ApplicationError> {
        let mut conversation = self
            .conversation_repository
            .get(command.conversation_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::ConversationNotFound(command.conversation_id.to_string())
            })?;

        let content = Content::new(command.content)?;
        let first_message = conversation.message_count() == 0;
        let message = conversation.add_message(content);

        // 首条消息为仍未命名的会话生成标题
        if first_message && conversation.has_default_title() {
            let title = Conversation::generate_title_from_message(&message);
            conversation.rename(title)?;
        }

        let events = conversation.take_events();
        self.conversation_repository.save(&conversation).await?;
        self.event_publisher.publish_all(events);

        Ok(PostMessageResponse { message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::EventBus;
    use crate::modules::chat::domain::{Owner, UserId, DEFAULT_TITLE};
    use crate::modules::chat::infrastructure::InMemoryConversationRepository;
    use crate::shared::DomainError;

    async fn saved_conversation(
        repo: &InMemoryConversationRepository,
        title: Option<&str>,
    ) -> Conversation {
        let mut conversation =
            Conversation::start(title.map(String::from), Owner::new(UserId::new())).unwrap();
        conversation.take_events();
        repo.save(&conversation).await.unwrap();
        conversation
    }

    #[tokio::test]
    async fn test_post_message_persists_and_publishes() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        let bus = Arc::new(EventBus::new());
        let handler = PostMessageHandler::new(repo.clone(), bus.clone());
        let conversation = saved_conversation(&repo, Some("已命名")).await;

        let mut receiver = bus.subscribe();
        let response = handler
            .handle(PostMessageCommand::new(conversation.id(), "你好"))
            .await
            .unwrap();

        assert_eq!(response.message.content().text(), "你好");

        let stored = repo.get(conversation.id()).await.unwrap().unwrap();
        assert_eq!(stored.message_count(), 1);
        assert_eq!(stored.messages()[0].id(), response.message.id());

        let event = receiver.recv().await.unwrap();
        assert_eq!(event.event_type(), "message.added");
    }

    #[tokio::test]
    async fn test_first_message_titles_unnamed_conversation() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        let bus = Arc::new(EventBus::new());
        let handler = PostMessageHandler::new(repo.clone(), bus);
        let conversation = saved_conversation(&repo, None).await;
        assert_eq!(conversation.title(), DEFAULT_TITLE);

        handler
            .handle(PostMessageCommand::new(conversation.id(), "周末去哪里爬山"))
            .await
            .unwrap();

        let stored = repo.get(conversation.id()).await.unwrap().unwrap();
        assert_eq!(stored.title(), "周末去哪里爬山");
    }

    #[tokio::test]
    async fn test_named_conversation_keeps_title() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        let bus = Arc::new(EventBus::new());
        let handler = PostMessageHandler::new(repo.clone(), bus);
        let conversation = saved_conversation(&repo, Some("固定标题")).await;

        handler
            .handle(PostMessageCommand::new(conversation.id(), "新内容"))
            .await
            .unwrap();

        let stored = repo.get(conversation.id()).await.unwrap().unwrap();
        assert_eq!(stored.title(), "固定标题");
    }

    #[tokio::test]
    async fn test_empty_content_rejected_without_persisting() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        let bus = Arc::new(EventBus::new());
        let handler = PostMessageHandler::new(repo.clone(), bus);
        let conversation = saved_conversation(&repo, None).await;

        let result = handler
            .handle(PostMessageCommand::new(conversation.id(), "   "))
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::DomainError(DomainError::InvalidArgument(_)))
        ));
        let stored = repo.get(conversation.id()).await.unwrap().unwrap();
        assert_eq!(stored.message_count(), 0);
    }
}
