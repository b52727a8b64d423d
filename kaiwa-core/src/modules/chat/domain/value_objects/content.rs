use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::{DomainError, DomainResult};

/// 消息内容
///
/// 值对象：构造后不可变，编辑消息时整体替换。
/// 空白内容在构造时即被拒绝，聚合内不会出现空消息。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Content {
    text: String,
}

impl Content {
    /// 创建消息内容，拒绝空白文本
    pub fn new(text: impl Into<String>) -> DomainResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::InvalidArgument(
                "message content cannot be empty".to_string(),
            ));
        }
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 内容的字符数
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
