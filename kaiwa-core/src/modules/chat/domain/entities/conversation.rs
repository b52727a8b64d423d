use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::events::{
    ConversationDomainEvent, ConversationRenamedEvent, ConversationStartedEvent,
    MessageAddedEvent, MessageEditedEvent, MessagePinnedEvent, MessagesRetrievedEvent,
    ParticipantAddedEvent, ParticipantRemovedEvent,
};
use super::super::rules::ParticipantLimitRule;
use super::super::value_objects::{
    Content, ConversationId, HistoryWindow, MessageId, Owner, Role, UserId,
};
use super::{Message, Participant};
use crate::modules::chat::ports::Tokenizer;
use crate::shared::{AggregateRoot, DomainError, DomainResult};

/// 未命名会话的默认标题
pub const DEFAULT_TITLE: &str = "新会话";

/// 标题最大字符数
const MAX_TITLE_CHARS: usize = 200;

/// 默认参与者数量上限
const DEFAULT_MAX_PARTICIPANTS: usize = 100;

/// 预算读取结果
///
/// 被接纳的消息按插入顺序（旧在前）排列，token 总数不超过窗口预算。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentContext {
    pub messages: Vec<Message>,
    pub token_count: u32,
}

/// 会话聚合根
///
/// 会话是 Chat 模块的一致性边界：持有有序的消息序列（插入顺序即
/// 时间顺序，消息 ID 唯一且不复用）、参与者列表和待分发事件队列。
/// 每次被接受的变更都会记录一条领域事件；失败的操作不留下任何
/// 可观察的副作用。并发控制由调用方负责，聚合假定单写者访问。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    /// 会话唯一标识
    id: ConversationId,
    /// 会话标题
    title: String,
    /// 所有者
    owner: Owner,
    /// 消息序列，插入顺序不可变
    messages: Vec<Message>,
    /// 在场参与者
    participants: Vec<Participant>,
    /// 参与者数量上限
    max_participants: usize,
    /// 创建时间
    created_at: DateTime<Utc>,
    /// 待分发的领域事件，不参与持久化
    #[serde(skip)]
    events: Vec<ConversationDomainEvent>,
}

fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvalidArgument(
            "conversation title cannot be empty".to_string(),
        ));
    }
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(DomainError::InvalidArgument(format!(
            "conversation title must be at most {} characters",
            MAX_TITLE_CHARS
        )));
    }
    Ok(())
}

impl Conversation {
    /// 开启新会话
    ///
    /// 未提供标题时使用默认标题，之后可由首条消息自动命名。
    pub fn start(title: Option<String>, owner: Owner) -> DomainResult<Self> {
        let title = title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
        validate_title(&title)?;

        let mut conversation = Self {
            id: ConversationId::new(),
            title: title.clone(),
            owner,
            messages: Vec::new(),
            participants: Vec::new(),
            max_participants: DEFAULT_MAX_PARTICIPANTS,
            created_at: Utc::now(),
            events: Vec::new(),
        };

        conversation.record_event(ConversationDomainEvent::ConversationStarted(
            ConversationStartedEvent {
                conversation_id: conversation.id,
                title,
                timestamp: Utc::now(),
            },
        ));

        Ok(conversation)
    }

    /// 调整参与者数量上限
    pub fn with_max_participants(mut self, limit: usize) -> Self {
        self.max_participants = limit;
        self
    }

    // Getters

    pub fn id(&self) -> ConversationId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn max_participants(&self) -> usize {
        self.max_participants
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// 标题是否仍是默认值
    pub fn has_default_title(&self) -> bool {
        self.title == DEFAULT_TITLE
    }

    // 业务方法

    /// 重命名会话
    pub fn rename(&mut self, title: impl Into<String>) -> DomainResult<()> {
        let title = title.into();
        validate_title(&title)?;

        self.title = title.clone();
        self.record_event(ConversationDomainEvent::ConversationRenamed(
            ConversationRenamedEvent {
                conversation_id: self.id,
                title,
                timestamp: Utc::now(),
            },
        ));

        Ok(())
    }

    /// 接纳参与者
    ///
    /// 同一用户至多在场一次；数量上限规则被破坏时拒绝变更。
    pub fn add_participant(&mut self, user_id: UserId, role: Role) -> DomainResult<Participant> {
        if self.participants.iter().any(|p| p.user_id() == user_id) {
            return Err(DomainError::duplicate("participant", user_id));
        }
        self.check_rule(&ParticipantLimitRule::new(
            self.participants.len(),
            self.max_participants,
        ))?;

        let participant = Participant::create(user_id, self.id, role);
        self.participants.push(participant.clone());

        self.record_event(ConversationDomainEvent::ParticipantAdded(
            ParticipantAddedEvent {
                conversation_id: self.id,
                user_id,
                role,
                timestamp: Utc::now(),
            },
        ));

        Ok(participant)
    }

    /// 移除参与者
    pub fn remove_participant(&mut self, user_id: UserId) -> DomainResult<()> {
        let position = self
            .participants
            .iter()
            .position(|p| p.user_id() == user_id)
            .ok_or_else(|| DomainError::not_found("participant", user_id))?;

        self.participants.remove(position);
        self.record_event(ConversationDomainEvent::ParticipantRemoved(
            ParticipantRemovedEvent {
                conversation_id: self.id,
                user_id,
                timestamp: Utc::now(),
            },
        ));

        Ok(())
    }

    /// 追加新消息
    ///
    /// 消息获得全新的唯一 ID 并排在序列末尾。
    pub fn add_message(&mut self, content: Content) -> Message {
        let message = Message::create(self.id, content);
        self.messages.push(message.clone());

        self.record_event(ConversationDomainEvent::MessageAdded(MessageAddedEvent {
            conversation_id: self.id,
            message_id: message.id(),
            timestamp: Utc::now(),
        }));

        message
    }

    /// 置顶消息
    ///
    /// 对已置顶的消息重复调用是无副作用的成功。
    pub fn pin_message(&mut self, message_id: MessageId) -> DomainResult<Message> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id() == message_id)
            .ok_or_else(|| DomainError::not_found("message", message_id))?;

        message.pin();
        let pinned = message.clone();

        self.record_event(ConversationDomainEvent::MessagePinned(MessagePinnedEvent {
            conversation_id: self.id,
            message_id,
            timestamp: Utc::now(),
        }));

        Ok(pinned)
    }

    /// 按插入顺序取出全部置顶消息
    pub fn get_pinned_messages(&self) -> Vec<&Message> {
        self.messages.iter().filter(|m| m.is_pinned()).collect()
    }

    /// 编辑或重新生成消息内容
    ///
    /// 旧内容保留为消息的历史版本，标识和位置不变。
    pub fn edit_message(&mut self, message_id: MessageId, content: Content) -> DomainResult<Content> {
        let message = self
            .messages
            .iter_mut()
            .find(|m| m.id() == message_id)
            .ok_or_else(|| DomainError::not_found("message", message_id))?;

        let edited_content = content.text().to_string();
        message.revise(content.clone());

        self.record_event(ConversationDomainEvent::MessageEdited(MessageEditedEvent {
            conversation_id: self.id,
            message_id,
            edited_content,
            timestamp: Utc::now(),
        }));

        Ok(content)
    }

    /// 按插入顺序取出最后 n 条消息
    ///
    /// 消息不足 n 条时返回全部，不视为错误。
    pub fn last_messages(&self, n: usize) -> DomainResult<Vec<&Message>> {
        if n == 0 {
            return Err(DomainError::InvalidArgument(
                "message count must be positive".to_string(),
            ));
        }
        let start = self.messages.len().saturating_sub(n);
        Ok(self.messages[start..].iter().collect())
    }

    /// 在 token 预算内读取最近消息
    ///
    /// 取最近 `max_recent` 条消息，从最新一条向旧逐条累计 token 数，
    /// 一旦累计将严格超出 `token_limit` 即停止（恰好等于上限仍被接纳）。
    /// 被接纳的消息按旧在前的顺序返回。最新一条消息单独超出预算时
    /// 返回空结果，这是合法的非错误结果。
    pub fn read_recent_within_budget(
        &mut self,
        tokenizer: &dyn Tokenizer,
        window: HistoryWindow,
    ) -> DomainResult<RecentContext> {
        let recent = self.last_messages(window.max_recent())?;

        let mut selected: Vec<Message> = Vec::new();
        let mut token_count: u32 = 0;
        for message in recent.into_iter().rev() {
            let tokens = message.count_tokens(tokenizer);
            if token_count + tokens > window.token_limit() {
                break;
            }
            selected.insert(0, message.clone());
            token_count += tokens;
        }

        self.record_event(ConversationDomainEvent::MessagesRetrieved(
            MessagesRetrievedEvent {
                conversation_id: self.id,
                retrieved_message_ids: selected.iter().map(|m| m.id()).collect(),
                token_count,
                timestamp: Utc::now(),
            },
        ));

        Ok(RecentContext {
            messages: selected,
            token_count,
        })
    }

    /// 根据消息内容生成标题（取前 20 个字符）
    pub fn generate_title_from_message(message: &Message) -> String {
        let content = message.content().text();
        let title: String = content.chars().take(20).collect();
        if content.chars().count() > 20 {
            format!("{}...", title)
        } else {
            title
        }
    }
}

impl AggregateRoot for Conversation {
    type Event = ConversationDomainEvent;

    fn pending_events(&self) -> &[ConversationDomainEvent] {
        &self.events
    }

    fn record_event(&mut self, event: ConversationDomainEvent) {
        self.events.push(event);
    }

    fn take_events(&mut self) -> Vec<ConversationDomainEvent> {
        std::mem::take(&mut self.events)
    }
}
