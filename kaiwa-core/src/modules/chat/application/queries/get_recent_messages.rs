use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, QueryHandler};
use crate::modules::chat::domain::{ConversationId, Message};
use crate::modules::chat::ports::ConversationRepository;

/// 获取最近消息查询
#[derive(Debug, Clone)]
pub struct GetRecentMessagesQuery {
    pub conversation_id: ConversationId,
    /// 最多取多少条
    pub count: usize,
}

impl GetRecentMessagesQuery {
    pub fn new(conversation_id: ConversationId, count: usize) -> Self {
        Self {
            conversation_id,
            count,
        }
    }
}

/// 获取最近消息响应
#[derive(Debug, Clone)]
pub struct GetRecentMessagesResponse {
    /// 最近消息，按插入顺序排列
    pub messages: Vec<Message>,
}

/// 获取最近消息查询处理器
pub struct GetRecentMessagesHandler {
    conversation_repository: Arc<dyn ConversationRepository>,
}

impl GetRecentMessagesHandler {
    pub fn new(conversation_repository: Arc<dyn ConversationRepository>) -> Self {
        Self {
            conversation_repository,
        }
    }
}

#[async_trait]
impl QueryHandler<GetRecentMessagesQuery, GetRecentMessagesResponse> for GetRecentMessagesHandler {
    async fn handle(
        &self,
        query: GetRecentMessagesQuery,
    ) -> Result<GetRecentMessagesResponse, ApplicationError> {
        let conversation = self
            .conversation_repository
            .get(query.conversation_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::ConversationNotFound(query.conversation_id.to_string())
            })?;

        let messages = conversation
            .last_messages(query.count)?
            .into_iter()
            .cloned()
            .collect();

        Ok(GetRecentMessagesResponse { messages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::chat::domain::{Content, Conversation, Owner, UserId};
    use crate::modules::chat::infrastructure::InMemoryConversationRepository;
    use crate::shared::DomainError;

    async fn conversation_with_messages(
        repo: &InMemoryConversationRepository,
        count: usize,
    ) -> Conversation {
        let mut conversation = Conversation::start(None, Owner::new(UserId::new())).unwrap();
        for i in 0..count {
            conversation.add_message(Content::new(format!("m{}", i)).unwrap());
        }
        repo.save(&conversation).await.unwrap();
        conversation
    }

    #[tokio::test]
    async fn test_get_recent_messages() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        let handler = GetRecentMessagesHandler::new(repo.clone());
        let conversation = conversation_with_messages(&repo, 5).await;

        let response = handler
            .handle(GetRecentMessagesQuery::new(conversation.id(), 2))
            .await
            .unwrap();

        let texts: Vec<&str> = response
            .messages
            .iter()
            .map(|m| m.content().text())
            .collect();
        assert_eq!(texts, vec!["m3", "m4"]);
    }

    #[tokio::test]
    async fn test_zero_count_rejected() {
        let repo = Arc::new(InMemoryConversationRepository::new());
        let handler = GetRecentMessagesHandler::new(repo.clone());
        let conversation = conversation_with_messages(&repo, 2).await;

        let result = handler
            .handle(GetRecentMessagesQuery::new(conversation.id(), 0))
            .await;

        assert!(matches!(
            result,
            Err(ApplicationError::DomainError(DomainError::InvalidArgument(_)))
        ));
    }
}
