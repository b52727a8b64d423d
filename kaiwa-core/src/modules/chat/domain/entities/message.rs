use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::super::value_objects::{Content, ConversationId, MessageId};
use crate::modules::chat::ports::Tokenizer;

/// 消息实体
///
/// 属于 Conversation 聚合。标识和插入位置在创建后不再变化；
/// 内容可被整体替换（编辑/重新生成），被替换的内容保留为历史版本。
/// 消息不会被物理删除。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// 消息唯一标识
    id: MessageId,
    /// 所属会话 ID
    conversation_id: ConversationId,
    /// 当前内容
    content: Content,
    /// 历史版本（编辑前的内容，按编辑先后排列）
    revisions: Vec<Content>,
    /// 是否置顶
    pinned: bool,
    /// 创建时间
    created_at: DateTime<Utc>,
    /// 最近一次编辑时间
    edited_at: Option<DateTime<Utc>>,
}

impl Message {
    /// 创建消息（仅由聚合调用）
    pub fn create(conversation_id: ConversationId, content: Content) -> Self {
        Self {
            id: MessageId::new(),
            conversation_id,
            content,
            revisions: Vec::new(),
            pinned: false,
            created_at: Utc::now(),
            edited_at: None,
        }
    }

    // Getters

    pub fn id(&self) -> MessageId {
        self.id
    }

    pub fn conversation_id(&self) -> ConversationId {
        self.conversation_id
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn revisions(&self) -> &[Content] {
        &self.revisions
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn edited_at(&self) -> Option<DateTime<Utc>> {
        self.edited_at
    }

    // 业务方法

    /// 置顶消息，重复置顶是无副作用的成功
    pub fn pin(&mut self) {
        self.pinned = true;
    }

    /// 替换内容，旧内容进入历史版本
    pub fn revise(&mut self, content: Content) {
        let previous = std::mem::replace(&mut self.content, content);
        self.revisions.push(previous);
        self.edited_at = Some(Utc::now());
    }

    /// 通过外部分词器统计当前内容的 token 数
    pub fn count_tokens(&self, tokenizer: &dyn Tokenizer) -> u32 {
        tokenizer.count_tokens(self.content.text())
    }
}
