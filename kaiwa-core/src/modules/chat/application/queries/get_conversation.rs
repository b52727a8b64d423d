use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, QueryHandler};
use crate::modules::chat::domain::{Conversation, ConversationId};
use crate::modules::chat::ports::ConversationRepository;

/// 获取会话查询
#[derive(Debug, Clone)]
pub struct GetConversationQuery {
    pub conversation_id: ConversationId,
}

impl GetConversationQuery {
    pub fn new(conversation_id: ConversationId) -> Self {
        Self { conversation_id }
    }
}

/// 获取会话响应
#[derive(Debug, Clone)]
pub struct GetConversationResponse {
    pub conversation: Option<Conversation>,
}

/// 获取会话查询处理器
pub struct GetConversationHandler {
    conversation_repository: Arc<dyn ConversationRepository>,
}

impl GetConversationHandler {
    pub fn new(conversation_repository: Arc<dyn ConversationRepository>) -> Self {
        Self {
            conversation_repository,
        }
    }
}

#[async_trait]
impl QueryHandler<GetConversationQuery, GetConversationResponse> for GetConversationHandler {
    async fn handle(
        &self,
        query: GetConversationQuery,
    ) -> Result<GetConversationResponse, ApplicationError> {
        let conversation = self
            .conversation_repository
            .get(query.conversation_id)
            .await?;

        Ok(GetConversationResponse { conversation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::domain::{Owner, UserId};
    use crate::modules::chat::infrastructure::InMemoryConversationRepository;

    #[tokio::test]
    async fn test_get_existing_conversation() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        let handler = GetConversationHandler::new(repo.clone());

        let conversation =
            Conversation::start(Some("查找我".to_string()), Owner::new(UserId::new())).unwrap();
        repo.save(&conversation).await.unwrap();

        let response = handler
            .handle(GetConversationQuery::new(conversation.id()))
            .await
            .unwrap();

        assert!(response.conversation.is_some());
        assert_eq!(response.conversation.unwrap().title(), "查找我");
    }

    #[tokio::test]
    async fn test_get_missing_conversation_returns_none() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        let handler = GetConversationHandler::new(repo);

        let response = handler
            .handle(GetConversationQuery::new(ConversationId::new()))
            .await
            .unwrap();

        assert!(response.conversation.is_none());
    }
}
