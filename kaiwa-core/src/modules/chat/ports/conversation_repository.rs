use async_trait::async_trait;
use thiserror::Error;

use super::super::domain::{Conversation, ConversationId};

/// 仓储错误类型
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// 分页参数
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Pagination {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    pub fn offset(&self) -> u32 {
        (self.page.saturating_sub(1)) * self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self { page: 1, limit: 20 }
    }
}

/// 分页结果
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub limit: u32,
}

impl<T> PaginatedResult<T> {
    pub fn new(items: Vec<T>, total: usize, pagination: Pagination) -> Self {
        Self {
            items,
            total,
            page: pagination.page,
            limit: pagination.limit,
        }
    }

    pub fn has_next(&self) -> bool {
        (self.page as usize * self.limit as usize) < self.total
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// 会话仓储端口
///
/// 定义会话聚合持久化的抽象接口。聚合的完整状态（标识、标题、
/// 所有者、有序消息、参与者、时间戳）必须可以被实现方整体重建；
/// 存储格式由实现方决定。
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// 根据 ID 获取会话
    async fn get(&self, id: ConversationId) -> Result<Option<Conversation>, RepositoryError>;

    /// 保存会话（创建或更新）
    async fn save(&self, conversation: &Conversation) -> Result<(), RepositoryError>;

    /// 删除会话
    async fn delete(&self, id: ConversationId) -> Result<(), RepositoryError>;

    /// 获取所有会话（分页）
    async fn find_all(
        &self,
        pagination: Pagination,
    ) -> Result<PaginatedResult<Conversation>, RepositoryError>;

    /// 检查会话是否存在
    async fn exists(&self, id: ConversationId) -> Result<bool, RepositoryError>;

    /// 获取会话总数
    async fn count(&self) -> Result<usize, RepositoryError>;
}
