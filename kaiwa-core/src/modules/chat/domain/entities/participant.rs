use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::value_objects::{ConversationId, Role, UserId};

/// 参与者实体
///
/// 属于 Conversation 聚合。同一用户在一个会话的在场参与者中至多出现一次。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    /// 用户 ID
    user_id: UserId,
    /// 所属会话 ID
    conversation_id: ConversationId,
    /// 权限级别
    role: Role,
    /// 加入时间
    joined_at: DateTime<Utc>,
}

impl Participant {
    /// 创建参与者（仅由聚合调用）
    pub fn create(user_id: UserId, conversation_id: ConversationId, role: Role) -> Self {
        Self {
            user_id,
            conversation_id,
            role,
            joined_at: Utc::now(),
        }
    }

    // Getters

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn joined_at(&self) -> DateTime<Utc> {
        self.joined_at
    }
}
