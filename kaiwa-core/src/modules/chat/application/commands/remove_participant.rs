use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::{ConversationId, UserId};
use crate::modules::chat::ports::{ConversationRepository, EventPublisher};
use crate::shared::AggregateRoot;

/// 移除参与者命令
#[derive(Debug, Clone)]
pub struct RemoveParticipantCommand {
    pub conversation_id: ConversationId,
    pub user_id: UserId,
}

impl RemoveParticipantCommand {
    pub fn new(conversation_id: ConversationId, user_id: UserId) -> Self {
        Self {
            conversation_id,
            user_id,
        }
    }
}

/// 移除参与者响应
#[derive(Debug, Clone)]
pub struct RemoveParticipantResponse {
    /// 移除后剩余的参与者数量
    pub participant_count: usize,
}

/// 移除参与者命令处理器
pub struct RemoveParticipantHandler {
    conversation_repository: Arc<dyn ConversationRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl RemoveParticipantHandler {
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
impl CommandHandler<RemoveParticipantCommand, RemoveParticipantResponse>
    for RemoveParticipantHandler
{
    async fn handle(
        &self,
        command: RemoveParticipantCommand,
    ) -> Result<RemoveParticipantResponse, ApplicationError> {
        let mut conversation = self
            .conversation_repository
            .get(command.conversation_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::ConversationNotFound(command.conversation_id.to_string())
            })?;

        conversation.remove_participant(command.user_id)?;

        let events = conversation.take_events();
        self.conversation_repository.save(&conversation).await?;
        self.event_publisher.publish_all(events);

        Ok(RemoveParticipantResponse {
            participant_count: conversation.participant_count(),
        })
    }
}
