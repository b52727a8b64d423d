use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, QueryHandler};
use crate::modules::chat::domain::{ConversationId, Message};
use crate::modules::chat::ports::ConversationRepository;

/// 获取置顶消息查询
#[derive(Debug, Clone)]
pub struct GetPinnedMessagesQuery {
    pub conversation_id: ConversationId,
}

impl GetPinnedMessagesQuery {
    pub fn new(conversation_id: ConversationId) -> Self {
        Self { conversation_id }
    }
}

/// 获取置顶消息响应
#[derive(Debug, Clone)]
pub struct GetPinnedMessagesResponse {
    /// 置顶消息，按插入顺序排列
    pub messages: Vec<Message>,
}

/// 获取置顶消息查询处理器
pub struct GetPinnedMessagesHandler {
    conversation_repository: Arc<dyn ConversationRepository>,
}

impl GetPinnedMessagesHandler {
    pub fn new(conversation_repository: Arc<dyn ConversationRepository>) -> Self {
        Self {
            conversation_repository,
        }
    }
}

#[async_trait]
impl QueryHandler<GetPinnedMessagesQuery, GetPinnedMessagesResponse> for GetPinnedMessagesHandler {
    async fn handle(
        &self,
        query: GetPinnedMessagesQuery,
    ) -> Result<GetPinnedMessagesResponse, ApplicationError> {
        let conversation = self
            .conversation_repository
            .get(query.conversation_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::ConversationNotFound(query.conversation_id.to_string())
            })?;

        let messages = conversation
            .get_pinned_messages()
            .into_iter()
            .cloned()
            .collect();

        Ok(GetPinnedMessagesResponse { messages })
    }
}
