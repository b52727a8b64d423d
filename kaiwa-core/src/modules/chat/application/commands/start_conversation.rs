use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::{Conversation, Owner, UserId};
use crate::modules::chat::ports::{ConversationRepository, EventPublisher};
use crate::shared::AggregateRoot;

/// 开启会话命令
#[derive(Debug, Clone)]
pub struct StartConversationCommand {
    /// 会话标题（可选，缺省使用默认标题）
    pub title: Option<String>,
    /// 所有者的用户 ID
    pub owner_id: UserId,
}

impl StartConversationCommand {
    pub fn new(title: Option<String>, owner_id: UserId) -> Self {
        Self { title, owner_id }
    }
}

/// 开启会话响应
#[derive(Debug, Clone)]
pub struct StartConversationResponse {
    pub conversation: Conversation,
}

/// 开启会话命令处理器
pub struct StartConversationHandler {
    conversation_repository: Arc<dyn ConversationRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    max_participants: usize,
}

impl StartConversationHandler {
    pub fn new(
        conversation_repository: Arc<dyn ConversationRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        max_participants: usize,
    ) -> Self {
        Self {
            conversation_repository,
            event_publisher,
            max_participants,
        }
    }
}

#[async_trait]
impl CommandHandler<StartConversationCommand, StartConversationResponse>
    for StartConversationHandler
{
    async fn handle(
        &self,
        command: StartConversationCommand,
    ) -> Result<StartConversationResponse, ApplicationError> {
        let mut conversation = Conversation::start(command.title, Owner::new(command.owner_id))?
            .with_max_participants(self.max_participants);

        let events = conversation.take_events();
        self.conversation_repository.save(&conversation).await?;
        self.event_publisher.publish_all(events);

        tracing::debug!(conversation_id = %conversation.id(), "Conversation started");

        Ok(StartConversationResponse { conversation })
    }
}
