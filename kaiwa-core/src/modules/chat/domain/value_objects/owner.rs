use serde::{Deserialize, Serialize};
use std::fmt;

use super::UserId;

/// 会话所有者
///
/// 值对象：指向创建会话的用户。所有者不随会话生命周期变化。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    user_id: UserId,
}

impl Owner {
    /// 从用户 ID 创建所有者引用
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_id)
    }
}

impl From<UserId> for Owner {
    fn from(user_id: UserId) -> Self {
        Self::new(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_holds_user_id() {
        let user_id = UserId::new();
        let owner = Owner::new(user_id);
        assert_eq!(owner.user_id(), user_id);
    }

    #[test]
    fn test_owner_from_user_id() {
        let user_id = UserId::new();
        let owner: Owner = user_id.into();
        assert_eq!(owner.to_string(), user_id.to_string());
    }
}
