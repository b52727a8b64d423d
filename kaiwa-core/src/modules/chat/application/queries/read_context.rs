use async_trait::async_trait;
use std::sync::Arc;

use super::super::{ApplicationError, QueryHandler};
use crate::modules::chat::domain::{ConversationId, HistoryWindow, RecentContext};
use crate::modules::chat::ports::{ConversationRepository, EventPublisher, Tokenizer};
use crate::shared::AggregateRoot;

/// 预算读取查询
///
/// 在 token 预算内读取最近的消息历史。聚合会为每次读取记录
/// 检索事件，因此该查询像命令一样保存并发布。
#[derive(Debug, Clone)]
pub struct ReadContextQuery {
    pub conversation_id: ConversationId,
    /// 读取窗口（缺省使用处理器配置的默认窗口）
    pub window: Option<HistoryWindow>,
}

impl ReadContextQuery {
    pub fn new(conversation_id: ConversationId) -> Self {
        Self {
            conversation_id,
            window: None,
        }
    }

    pub fn with_window(mut self, window: HistoryWindow) -> Self {
        self.window = Some(window);
        self
    }
}

/// 预算读取响应
#[derive(Debug, Clone)]
pub struct ReadContextResponse {
    pub context: RecentContext,
}

/// 预算读取查询处理器
pub struct ReadContextHandler {
    conversation_repository: Arc<dyn ConversationRepository>,
    tokenizer: Arc<dyn Tokenizer>,
    event_publisher: Arc<dyn EventPublisher>,
    default_window: HistoryWindow,
}

impl ReadContextHandler {
    pub fn new(
        conversation_repository: Arc<dyn ConversationRepository>,
        tokenizer: Arc<dyn Tokenizer>,
        event_publisher: Arc<dyn EventPublisher>,
        default_window: HistoryWindow,
    ) -> Self {
        Self {
            conversation_repository,
            tokenizer,
            event_publisher,
            default_window,
        }
    }
}

#[async_trait]
impl QueryHandler<ReadContextQuery, ReadContextResponse> for ReadContextHandler {
    async fn handle(
        &self,
        query: ReadContextQuery,
    ) -> Result<ReadContextResponse, ApplicationError> {
        let mut conversation = self
            .conversation_repository
            .get(query.conversation_id)
            .await?
            .ok_or_else(|| {
                ApplicationError::ConversationNotFound(query.conversation_id.to_string())
            })?;

        let window = query.window.unwrap_or(self.default_window);
        let context = conversation.read_recent_within_budget(self.tokenizer.as_ref(), window)?;

        let events = conversation.take_events();
        self.conversation_repository.save(&conversation).await?;
        self.event_publisher.publish_all(events);

        tracing::debug!(
            conversation_id = %query.conversation_id,
            token_count = context.token_count,
            messages = context.messages.len(),
            "Recent context read within budget"
        );

        Ok(ReadContextResponse { context })
    }
}
