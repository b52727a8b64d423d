// Chat Module - 会话模块
//
// 实现六边形架构（Hexagonal Architecture）：
// - domain: 领域层，包含会话聚合、实体、值对象、业务规则和领域事件
// - ports: 端口层，定义与外部世界的抽象接口
// - infrastructure: 基础设施层，实现端口的具体适配器
// - application: 应用层，实现 CQRS 命令和查询处理器

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// 重新导出常用类型
pub use application::{
    // Traits
    ApplicationError,
    CommandHandler,
    QueryHandler,
    // Commands
    AddParticipantCommand,
    AddParticipantHandler,
    AddParticipantResponse,
    DeleteConversationCommand,
    DeleteConversationHandler,
    DeleteConversationResponse,
    EditMessageCommand,
    EditMessageHandler,
    EditMessageResponse,
    PinMessageCommand,
    PinMessageHandler,
    PinMessageResponse,
    PostMessageCommand,
    PostMessageHandler,
    PostMessageResponse,
    RemoveParticipantCommand,
    RemoveParticipantHandler,
    RemoveParticipantResponse,
    RenameConversationCommand,
    RenameConversationHandler,
    RenameConversationResponse,
    StartConversationCommand,
    StartConversationHandler,
    StartConversationResponse,
    // Queries
    GetConversationHandler,
    GetConversationQuery,
    GetConversationResponse,
    GetPinnedMessagesHandler,
    GetPinnedMessagesQuery,
    GetPinnedMessagesResponse,
    GetRecentMessagesHandler,
    GetRecentMessagesQuery,
    GetRecentMessagesResponse,
    ListConversationsHandler,
    ListConversationsQuery,
    ListConversationsResponse,
    ReadContextHandler,
    ReadContextQuery,
    ReadContextResponse,
};

pub use domain::{
    Content, Conversation, ConversationDomainEvent, ConversationId, HistoryWindow, Message,
    MessageId, Owner, Participant, RecentContext, Role, UserId,
};

pub use infrastructure::{HeuristicTokenizer, InMemoryConversationRepository};

pub use ports::{
    ConversationRepository, EventPublisher, PaginatedResult, Pagination, RepositoryError,
    Tokenizer,
};

use serde::Deserialize;
use std::sync::Arc;

/// Chat 模块配置
///
/// 宿主应用可从自己的配置源反序列化后传入。
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatModuleConfig {
    /// 单个会话的参与者数量上限
    pub max_participants: usize,
    /// 预算读取的默认窗口
    pub history_window: HistoryWindow,
}

impl Default for ChatModuleConfig {
    fn default() -> Self {
        Self {
            max_participants: 100,
            history_window: HistoryWindow::default(),
        }
    }
}

/// Chat 模块容器
///
/// 管理模块内的依赖注入
pub struct ChatModule {
    // Ports
    conversation_repository: Arc<dyn ConversationRepository>,
    tokenizer: Arc<dyn Tokenizer>,
    event_publisher: Arc<dyn EventPublisher>,
    // Handlers
    start_conversation_handler: StartConversationHandler,
    rename_conversation_handler: RenameConversationHandler,
    delete_conversation_handler: DeleteConversationHandler,
    add_participant_handler: AddParticipantHandler,
    remove_participant_handler: RemoveParticipantHandler,
    post_message_handler: PostMessageHandler,
    pin_message_handler: PinMessageHandler,
    edit_message_handler: EditMessageHandler,
    get_conversation_handler: GetConversationHandler,
    list_conversations_handler: ListConversationsHandler,
    get_pinned_messages_handler: GetPinnedMessagesHandler,
    get_recent_messages_handler: GetRecentMessagesHandler,
    read_context_handler: ReadContextHandler,
}

impl ChatModule {
    /// 创建新的 ChatModule 实例（内存仓储 + 启发式分词，用于开发测试）
    pub fn new() -> Self {
        Self::with_config(ChatModuleConfig::default())
    }

    /// 使用自定义配置创建 ChatModule
    pub fn with_config(config: ChatModuleConfig) -> Self {
        let conversation_repository: Arc<dyn ConversationRepository> =
            Arc::new(InMemoryConversationRepository::new());
        let tokenizer: Arc<dyn Tokenizer> = Arc::new(HeuristicTokenizer::new());
        let event_publisher: Arc<dyn EventPublisher> =
            Arc::new(crate::infrastructure::EventBus::new());

        Self::with_ports(conversation_repository, tokenizer, event_publisher, config)
    }

    /// 使用自定义端口实现创建 ChatModule
    pub fn with_ports(
        conversation_repository: Arc<dyn ConversationRepository>,
        tokenizer: Arc<dyn Tokenizer>,
        event_publisher: Arc<dyn EventPublisher>,
        config: ChatModuleConfig,
    ) -> Self {
        let start_conversation_handler = StartConversationHandler::new(
            conversation_repository.clone(),
            event_publisher.clone(),
            config.max_participants,
        );
        let rename_conversation_handler =
            RenameConversationHandler::new(conversation_repository.clone(), event_publisher.clone());
        let delete_conversation_handler =
            DeleteConversationHandler::new(conversation_repository.clone());
        let add_participant_handler =
            AddParticipantHandler::new(conversation_repository.clone(), event_publisher.clone());
        let remove_participant_handler =
            RemoveParticipantHandler::new(conversation_repository.clone(), event_publisher.clone());
        let post_message_handler =
            PostMessageHandler::new(conversation_repository.clone(), event_publisher.clone());
        let pin_message_handler =
            PinMessageHandler::new(conversation_repository.clone(), event_publisher.clone());
        let edit_message_handler =
            EditMessageHandler::new(conversation_repository.clone(), event_publisher.clone());
        let get_conversation_handler =
            GetConversationHandler::new(conversation_repository.clone());
        let list_conversations_handler =
            ListConversationsHandler::new(conversation_repository.clone());
        let get_pinned_messages_handler =
            GetPinnedMessagesHandler::new(conversation_repository.clone());
        let get_recent_messages_handler =
            GetRecentMessagesHandler::new(conversation_repository.clone());
        let read_context_handler = ReadContextHandler::new(
            conversation_repository.clone(),
            tokenizer.clone(),
            event_publisher.clone(),
            config.history_window,
        );

        Self {
            conversation_repository,
            tokenizer,
            event_publisher,
            start_conversation_handler,
            rename_conversation_handler,
            delete_conversation_handler,
            add_participant_handler,
            remove_participant_handler,
            post_message_handler,
            pin_message_handler,
            edit_message_handler,
            get_conversation_handler,
            list_conversations_handler,
            get_pinned_messages_handler,
            get_recent_messages_handler,
            read_context_handler,
        }
    }

    // Command handlers

    /// 开启会话
    pub async fn start_conversation(
        &self,
        command: StartConversationCommand,
    ) -> Result<StartConversationResponse, ApplicationError> {
        self.start_conversation_handler.handle(command).await
    }

    /// 重命名会话
    pub async fn rename_conversation(
        &self,
        command: RenameConversationCommand,
    ) -> Result<RenameConversationResponse, ApplicationError> {
        self.rename_conversation_handler.handle(command).await
    }

    /// 删除会话
    pub async fn delete_conversation(
        &self,
        command: DeleteConversationCommand,
    ) -> Result<DeleteConversationResponse, ApplicationError> {
        self.delete_conversation_handler.handle(command).await
    }

    /// 接纳参与者
    pub async fn add_participant(
        &self,
        command: AddParticipantCommand,
    ) -> Result<AddParticipantResponse, ApplicationError> {
        self.add_participant_handler.handle(command).await
    }

    /// 移除参与者
    pub async fn remove_participant(
        &self,
        command: RemoveParticipantCommand,
    ) -> Result<RemoveParticipantResponse, ApplicationError> {
        self.remove_participant_handler.handle(command).await
    }

    /// 发布消息
    pub async fn post_message(
        &self,
        command: PostMessageCommand,
    ) -> Result<PostMessageResponse, ApplicationError> {
        self.post_message_handler.handle(command).await
    }

    /// 置顶消息
    pub async fn pin_message(
        &self,
        command: PinMessageCommand,
    ) -> Result<PinMessageResponse, ApplicationError> {
        self.pin_message_handler.handle(command).await
    }

    /// 编辑消息
    pub async fn edit_message(
        &self,
        command: EditMessageCommand,
    ) -> Result<EditMessageResponse, ApplicationError> {
        self.edit_message_handler.handle(command).await
    }

    // Query handlers

    /// 获取会话
    pub async fn get_conversation(
        &self,
        query: GetConversationQuery,
    ) -> Result<GetConversationResponse, ApplicationError> {
        self.get_conversation_handler.handle(query).await
    }

    /// 列出所有会话
    pub async fn list_conversations(
        &self,
        query: ListConversationsQuery,
    ) -> Result<ListConversationsResponse, ApplicationError> {
        self.list_conversations_handler.handle(query).await
    }

    /// 获取置顶消息
    pub async fn get_pinned_messages(
        &self,
        query: GetPinnedMessagesQuery,
    ) -> Result<GetPinnedMessagesResponse, ApplicationError> {
        self.get_pinned_messages_handler.handle(query).await
    }

    /// 获取最近消息
    pub async fn get_recent_messages(
        &self,
        query: GetRecentMessagesQuery,
    ) -> Result<GetRecentMessagesResponse, ApplicationError> {
        self.get_recent_messages_handler.handle(query).await
    }

    /// 在 token 预算内读取最近历史
    pub async fn read_context(
        &self,
        query: ReadContextQuery,
    ) -> Result<ReadContextResponse, ApplicationError> {
        self.read_context_handler.handle(query).await
    }

    // Accessors

    /// 获取会话仓储
    pub fn conversation_repository(&self) -> &Arc<dyn ConversationRepository> {
        &self.conversation_repository
    }

    /// 获取分词器
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// 获取事件发布端口
    pub fn event_publisher(&self) -> &Arc<dyn EventPublisher> {
        &self.event_publisher
    }
}

impl Default for ChatModule {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::EventBus;

    #[tokio::test]
    async fn test_chat_module_integration() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("kaiwa_core=debug")
            .try_init();

        let repository = Arc::new(InMemoryConversationRepository::new());
        let bus = Arc::new(EventBus::new());
        let mut receiver = bus.subscribe();
        let module = ChatModule::with_ports(
            repository,
            Arc::new(HeuristicTokenizer::new()),
            bus.clone(),
            ChatModuleConfig::default(),
        );

        // 开启会话
        let start_resp = module
            .start_conversation(StartConversationCommand::new(None, UserId::new()))
            .await
            .unwrap();
        let conversation_id = start_resp.conversation.id();

        // 接纳参与者
        module
            .add_participant(AddParticipantCommand::new(
                conversation_id,
                UserId::new(),
                Role::Member,
            ))
            .await
            .unwrap();

        // 发布消息，首条消息自动命名会话
        let post_resp = module
            .post_message(PostMessageCommand::new(conversation_id, "讨论下周的发布计划"))
            .await
            .unwrap();
        let get_resp = module
            .get_conversation(GetConversationQuery::new(conversation_id))
            .await
            .unwrap();
        assert_eq!(get_resp.conversation.unwrap().title(), "讨论下周的发布计划");

        // 置顶并编辑
        module
            .pin_message(PinMessageCommand::new(
                conversation_id,
                post_resp.message.id(),
            ))
            .await
            .unwrap();
        module
            .edit_message(EditMessageCommand::new(
                conversation_id,
                post_resp.message.id(),
                "讨论下周发布计划（已更新）",
            ))
            .await
            .unwrap();

        let pinned = module
            .get_pinned_messages(GetPinnedMessagesQuery::new(conversation_id))
            .await
            .unwrap();
        assert_eq!(pinned.messages.len(), 1);
        assert_eq!(pinned.messages[0].content().text(), "讨论下周发布计划（已更新）");

        // 预算读取
        let context = module
            .read_context(ReadContextQuery::new(conversation_id))
            .await
            .unwrap();
        assert_eq!(context.context.messages.len(), 1);
        assert!(context.context.token_count > 0);

        // 事件按发生顺序到达订阅者
        let expected = [
            "conversation.started",
            "participant.added",
            "message.added",
            "conversation.renamed",
            "message.pinned",
            "message.edited",
            "messages.retrieved",
        ];
        for event_type in expected {
            let event = receiver.recv().await.unwrap();
            assert_eq!(event.event_type(), event_type);
        }

        // 删除会话
        let delete_resp = module
            .delete_conversation(DeleteConversationCommand::new(conversation_id))
            .await
            .unwrap();
        assert_eq!(delete_resp.deleted_messages, 1);

        let list_resp = module
            .list_conversations(ListConversationsQuery::default())
            .await
            .unwrap();
        assert_eq!(list_resp.total, 0);
    }

    #[tokio::test]
    async fn test_module_config_limits_participants() {
        let config = ChatModuleConfig {
            max_participants: 1,
            ..ChatModuleConfig::default()
        };
        let module = ChatModule::with_config(config);

        let start_resp = module
            .start_conversation(StartConversationCommand::new(None, UserId::new()))
            .await
            .unwrap();
        let conversation_id = start_resp.conversation.id();

        module
            .add_participant(AddParticipantCommand::new(
                conversation_id,
                UserId::new(),
                Role::Member,
            ))
            .await
            .unwrap();

        let result = module
            .add_participant(AddParticipantCommand::new(
                conversation_id,
                UserId::new(),
                Role::Member,
            ))
            .await;

        assert!(result.is_err());
    }
}
