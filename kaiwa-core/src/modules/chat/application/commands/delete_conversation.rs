use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, CommandHandler};
use crate::modules::chat::domain::ConversationId;
use crate::modules::chat::ports::ConversationRepository;

/// 删除会话命令
#[derive(Debug, Clone)]
pub struct DeleteConversationCommand {
    pub conversation_id: ConversationId,
}

impl DeleteConversationCommand {
    pub fn new(conversation_id: ConversationId) -> Self {
        Self { conversation_id }
    }
}

/// 删除会话响应
#[derive(Debug, Clone)]
pub struct DeleteConversationResponse {
    /// 随会话一并删除的消息数
    pub deleted_messages: usize,
}

/// 删除会话命令处理器
pub struct DeleteConversationHandler {
    conversation_repository: Arc<dyn ConversationRepository>,
}

impl DeleteConversationHandler {
    pub fn new(conversation_repository: Arc<dyn ConversationRepository>) -> Self {
        Self {
            conversation_repository,
        }
    }
}

#[async_trait]
impl CommandHandler<DeleteConversationCommand, DeleteConversationResponse>
    for DeleteConversationHandler
{
    async fn handle(
        &self,
        command: DeleteConversationCommand,
    ) -> Result<DeleteConversationResponse, ApplicationError> {
        let conversation = self
            .conversation_repository
            .get(command.conversation_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::ConversationNotFound(command.conversation_id.to_string())
            })?;

        let deleted_messages = conversation.message_count();
        self.conversation_repository
            .delete(command.conversation_id)
            .await?;

        tracing::debug!(conversation_id = %command.conversation_id, "Conversation deleted");

        Ok(DeleteConversationResponse { deleted_messages })
    }
}
