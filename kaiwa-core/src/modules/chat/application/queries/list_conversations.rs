use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, QueryHandler};
use crate::modules::chat::domain::Conversation;
use crate::modules::chat::ports::{ConversationRepository, PaginatedResult, Pagination};

/// 列出会话查询
#[derive(Debug, Clone)]
pub struct ListConversationsQuery {
    pub page: u32,
    pub limit: u32,
}

impl ListConversationsQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }
}

impl Default for ListConversationsQuery {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

/// 列出会话响应
#[derive(Debug, Clone)]
pub struct ListConversationsResponse {
    pub conversations: Vec<Conversation>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub has_more: bool,
}

impl From<PaginatedResult<Conversation>> for ListConversationsResponse {
    fn from(result: PaginatedResult<Conversation>) -> Self {
        let has_more = result.has_next();
        Self {
            conversations: result.items,
            total: result.total,
            page: result.page,
            limit: result.limit,
            has_more,
        }
    }
}

/// 列出会话查询处理器
pub struct ListConversationsHandler {
    conversation_repository: Arc<dyn ConversationRepository>,
}

impl ListConversationsHandler {
    pub fn new(conversation_repository: Arc<dyn ConversationRepository>) -> Self {
        Self {
            conversation_repository,
        }
    }
}

#[async_trait]
impl QueryHandler<ListConversationsQuery, ListConversationsResponse> for ListConversationsHandler {
    async fn handle(
        &self,
        query: ListConversationsQuery,
    ) -> Result<ListConversationsResponse, ApplicationError> {
        let pagination = Pagination::new(query.page, query.limit);
        let result = self.conversation_repository.find_all(pagination).await?;

        Ok(result.into())
    }
}
