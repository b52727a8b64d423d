use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::modules::chat::domain::{Conversation, ConversationId};
use crate::modules::chat::ports::{
    ConversationRepository, PaginatedResult, Pagination, RepositoryError,
};

/// 内存会话仓储
///
/// 用于开发和测试，后续可替换为持久化实现
pub struct InMemoryConversationRepository {
    conversations: RwLock<HashMap<ConversationId, Conversation>>,
}

impl InMemoryConversationRepository {
    pub fn new() -> Self {
        Self {
            conversations: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryConversationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationRepository for InMemoryConversationRepository {
    async fn get(&self, id: ConversationId) -> Result<Option<Conversation>, RepositoryError> {
        let conversations = self.conversations.read().await;
        Ok(conversations.get(&id).cloned())
    }

    async fn save(&self, conversation: &Conversation) -> Result<(), RepositoryError> {
        let mut conversations = self.conversations.write().await;
        conversations.insert(conversation.id(), conversation.clone());
        Ok(())
    }

    async fn delete(&self, id: ConversationId) -> Result<(), RepositoryError> {
        let mut conversations = self.conversations.write().await;
        conversations
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn find_all(
        &self,
        pagination: Pagination,
    ) -> Result<PaginatedResult<Conversation>, RepositoryError> {
        let conversations = self.conversations.read().await;

        // 列表按创建时间排序，保证分页稳定
        let mut all: Vec<Conversation> = conversations.values().cloned().collect();
        all.sort_by_key(|c| c.created_at());

        let total = all.len();
        let offset = pagination.offset() as usize;
        let limit = pagination.limit as usize;

        let items = if offset < total {
            all[offset..total.min(offset + limit)].to_vec()
        } else {
            Vec::new()
        };

        Ok(PaginatedResult::new(items, total, pagination))
    }

    async fn exists(&self, id: ConversationId) -> Result<bool, RepositoryError> {
        let conversations = self.conversations.read().await;
        Ok(conversations.contains_key(&id))
    }

    async fn count(&self) -> Result<usize, RepositoryError> {
        let conversations = self.conversations.read().await;
        Ok(conversations.len())
    }
}
