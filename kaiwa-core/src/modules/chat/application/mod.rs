// Chat Application Layer - 应用层
// 实现 CQRS 模式的命令和查询处理器
//
// 变更型处理器遵循统一流程：加载聚合 → 执行操作 → 取走事件 →
// 保存 → 发布。失败的操作不保存也不发布任何事件。

pub mod commands;
pub mod queries;

// 导出命令和查询
pub use commands::*;
pub use queries::*;

use async_trait::async_trait;
use thiserror::Error;

use super::ports::RepositoryError;
use crate::shared::DomainError;

/// 应用层错误类型
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("Conversation not found: {0}")]
    ConversationNotFound(String),

    #[error("Domain error: {0}")]
    DomainError(#[from] DomainError),

    #[error("Repository error: {0}")]
    RepositoryError(#[from] RepositoryError),
}

/// 命令处理器 trait
///
/// 遵循 CQRS 模式，命令处理器负责执行有副作用的操作
#[async_trait]
pub trait CommandHandler<C, R>: Send + Sync
where
    C: Send + Sync,
{
    /// 执行命令
    async fn handle(&self, command: C) -> Result<R, ApplicationError>;
}

/// 查询处理器 trait
///
/// 遵循 CQRS 模式，查询处理器负责只读操作
#[async_trait]
pub trait QueryHandler<Q, R>: Send + Sync
where
    Q: Send + Sync,
{
    /// 执行查询
    async fn handle(&self, query: Q) -> Result<R, ApplicationError>;
}
