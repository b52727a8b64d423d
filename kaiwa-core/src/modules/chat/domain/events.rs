use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{ConversationId, MessageId, Role, UserId};

/// 领域事件基础 trait
///
/// 事件是对已发生状态变更的不可变记录，创建后不再修改。
pub trait DomainEvent: Clone + Send + Sync {
    fn event_type(&self) -> &'static str;
    fn timestamp(&self) -> DateTime<Utc>;
}

/// 会话创建事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationStartedEvent {
    pub conversation_id: ConversationId,
    pub title: String,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for ConversationStartedEvent {
    fn event_type(&self) -> &'static str {
        "conversation.started"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 会话改名事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationRenamedEvent {
    pub conversation_id: ConversationId,
    pub title: String,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for ConversationRenamedEvent {
    fn event_type(&self) -> &'static str {
        "conversation.renamed"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 参与者加入事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantAddedEvent {
    pub conversation_id: ConversationId,
    pub user_id: UserId,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for ParticipantAddedEvent {
    fn event_type(&self) -> &'static str {
        "participant.added"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 参与者移除事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRemovedEvent {
    pub conversation_id: ConversationId,
    pub user_id: UserId,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for ParticipantRemovedEvent {
    fn event_type(&self) -> &'static str {
        "participant.removed"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 消息追加事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageAddedEvent {
    pub conversation_id: ConversationId,
    pub message_id: MessageId,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for MessageAddedEvent {
    fn event_type(&self) -> &'static str {
        "message.added"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 消息置顶事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagePinnedEvent {
    pub conversation_id: ConversationId,
    pub message_id: MessageId,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for MessagePinnedEvent {
    fn event_type(&self) -> &'static str {
        "message.pinned"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 消息编辑事件
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEditedEvent {
    pub conversation_id: ConversationId,
    pub message_id: MessageId,
    pub edited_content: String,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for MessageEditedEvent {
    fn event_type(&self) -> &'static str {
        "message.edited"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 消息检索事件（预算读取）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesRetrievedEvent {
    pub conversation_id: ConversationId,
    pub retrieved_message_ids: Vec<MessageId>,
    pub token_count: u32,
    pub timestamp: DateTime<Utc>,
}

impl DomainEvent for MessagesRetrievedEvent {
    fn event_type(&self) -> &'static str {
        "messages.retrieved"
    }

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// 会话领域事件枚举
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ConversationDomainEvent {
    ConversationStarted(ConversationStartedEvent),
    ConversationRenamed(ConversationRenamedEvent),
    ParticipantAdded(ParticipantAddedEvent),
    ParticipantRemoved(ParticipantRemovedEvent),
    MessageAdded(MessageAddedEvent),
    MessagePinned(MessagePinnedEvent),
    MessageEdited(MessageEditedEvent),
    MessagesRetrieved(MessagesRetrievedEvent),
}

impl ConversationDomainEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            ConversationDomainEvent::ConversationStarted(e) => e.event_type(),
            ConversationDomainEvent::ConversationRenamed(e) => e.event_type(),
            ConversationDomainEvent::ParticipantAdded(e) => e.event_type(),
            ConversationDomainEvent::ParticipantRemoved(e) => e.event_type(),
            ConversationDomainEvent::MessageAdded(e) => e.event_type(),
            ConversationDomainEvent::MessagePinned(e) => e.event_type(),
            ConversationDomainEvent::MessageEdited(e) => e.event_type(),
            ConversationDomainEvent::MessagesRetrieved(e) => e.event_type(),
        }
    }

    /// 事件所属的会话 ID
    pub fn conversation_id(&self) -> ConversationId {
        match self {
            ConversationDomainEvent::ConversationStarted(e) => e.conversation_id,
            ConversationDomainEvent::ConversationRenamed(e) => e.conversation_id,
            ConversationDomainEvent::ParticipantAdded(e) => e.conversation_id,
            ConversationDomainEvent::ParticipantRemoved(e) => e.conversation_id,
            ConversationDomainEvent::MessageAdded(e) => e.conversation_id,
            ConversationDomainEvent::MessagePinned(e) => e.conversation_id,
            ConversationDomainEvent::MessageEdited(e) => e.conversation_id,
            ConversationDomainEvent::MessagesRetrieved(e) => e.conversation_id,
        }
    }
}
