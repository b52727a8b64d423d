use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::{ConversationId, Participant, Role, UserId};
use crate::modules::chat::ports::{ConversationRepository, EventPublisher};
use crate::shared::AggregateRoot;

/// 接纳参与者命令
#[derive(Debug, Clone)]
pub struct AddParticipantCommand {
    pub conversation_id: ConversationId,
    pub user_id: UserId,
    pub role: Role,
}

impl AddParticipantCommand {
    pub fn new(conversation_id: ConversationId, user_id: UserId, role: Role) -> Self {
        Self {
            conversation_id,
            user_id,
            role,
        }
    }
}

/// 接纳参与者响应
#[derive(Debug, Clone)]
pub struct AddParticipantResponse {
    pub participant: Participant,
}

/// 接纳参与者命令处理器
pub struct AddParticipantHandler {
    conversation_repository: Arc<dyn ConversationRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl AddParticipantHandler {
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
impl CommandHandler<AddParticipantCommand, AddParticipantResponse> for AddParticipantHandler {
    async fn handle(
        &self,
        command: AddParticipantCommand,
    ) -> Result<AddParticipantResponse, ApplicationError> {
        let mut conversation = self
            .conversation_repository
            .get(command.conversation_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::ConversationNotFound(command.conversation_id.to_string())
            })?;

        let participant = conversation.add_participant(command.user_id, command.role)?;

        let events = conversation.take_events();
        self.conversation_repository.save(&conversation).await?;
        self.event_publisher.publish_all(events);

        Ok(AddParticipantResponse { participant })
    }
}
